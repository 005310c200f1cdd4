//! Component and constructor traits.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use super::types::{Instance, Properties};
use crate::context::Farbs;
use crate::dom::NodeRef;
use crate::error::Result;

/// Access to `Any` for every `'static` type, so components can be
/// downcast after they went through the registry.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Anything a registered constructor produces.
///
/// The scanner only needs to hand namespace attributes to the instance, so
/// being property-assignable is the whole contract.
pub trait Component: AsAny {
    /// Assign a single property read from a `data-<namespace>_<name>`
    /// attribute.
    fn set_property(&mut self, name: &str, value: &str);

    /// Assign every property of the map.
    fn apply_properties(&mut self, properties: &Properties) {
        for (name, value) in properties {
            self.set_property(name, value);
        }
    }
}

impl dyn Component {
    /// Whether the instance is a `T`.
    #[must_use]
    pub fn is<T: Component>(&self) -> bool {
        AsAny::as_any(self).is::<T>()
    }

    #[must_use]
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        AsAny::as_any(self).downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        AsAny::as_any_mut(self).downcast_mut::<T>()
    }
}

/// Constructor registered in the class registry.
///
/// Implemented for every `Fn(&NodeRef, &Farbs) -> Result<C>` where `C` is a
/// component, so plain functions like `Checkbox::new` register directly.
pub trait ComponentFactory {
    /// Build an instance for `node`.
    ///
    /// # Errors
    /// Whatever the constructor reports; the scanner stops at the first error.
    fn construct(&self, node: &NodeRef, farbs: &Farbs) -> Result<Instance>;
}

impl<F, C> ComponentFactory for F
where
    F: Fn(&NodeRef, &Farbs) -> Result<C>,
    C: Component,
{
    fn construct(&self, node: &NodeRef, farbs: &Farbs) -> Result<Instance> {
        let component = self(node, farbs)?;
        Ok(Rc::new(RefCell::new(component)))
    }
}

/// Component that only remembers the properties applied to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyBag {
    pub properties: Properties,
}

impl PropertyBag {
    /// Constructor with the registered-class signature.
    ///
    /// # Errors
    /// Never fails.
    pub fn new(_node: &NodeRef, _farbs: &Farbs) -> Result<Self> {
        Ok(Self::default())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }
}

impl Component for PropertyBag {
    fn set_property(&mut self, name: &str, value: &str) {
        self.properties.insert(name.to_string(), value.to_string());
    }
}
