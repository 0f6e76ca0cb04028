//! Conversions from member return types into [`PropValue`].

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::Value;

use super::{DeferredProp, PropValue, Props, SharedProvider};
use crate::DataProvider;

/// Conversion applied to every property read and method return value.
///
/// Returning an `Arc` of a provider yields [`PropValue::Provider`], which
/// nested composition expands recursively.
pub trait IntoPropValue {
    /// Perform the conversion.
    fn into_prop_value(self) -> PropValue;
}

impl IntoPropValue for PropValue {
    fn into_prop_value(self) -> PropValue {
        self
    }
}

impl IntoPropValue for Value {
    fn into_prop_value(self) -> PropValue {
        PropValue::Concrete(self)
    }
}

macro_rules! concrete_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoPropValue for $ty {
                fn into_prop_value(self) -> PropValue {
                    PropValue::Concrete(Value::from(self))
                }
            }
        )*
    };
}

concrete_from!(
    bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, String, &str, (),
);

impl IntoPropValue for Cow<'_, str> {
    fn into_prop_value(self) -> PropValue {
        PropValue::Concrete(Value::String(self.into_owned()))
    }
}

impl IntoPropValue for char {
    fn into_prop_value(self) -> PropValue {
        PropValue::Concrete(Value::String(self.to_string()))
    }
}

impl IntoPropValue for DeferredProp {
    fn into_prop_value(self) -> PropValue {
        PropValue::Deferred(self)
    }
}

impl IntoPropValue for Props {
    fn into_prop_value(self) -> PropValue {
        PropValue::Map(self)
    }
}

impl IntoPropValue for SharedProvider {
    fn into_prop_value(self) -> PropValue {
        PropValue::Provider(self)
    }
}

impl<P> IntoPropValue for Arc<P>
where
    P: DataProvider + 'static,
{
    fn into_prop_value(self) -> PropValue {
        PropValue::Provider(self)
    }
}

impl<T: IntoPropValue> IntoPropValue for Option<T> {
    fn into_prop_value(self) -> PropValue {
        self.map_or_else(PropValue::null, IntoPropValue::into_prop_value)
    }
}

impl<T: IntoPropValue> IntoPropValue for Vec<T> {
    fn into_prop_value(self) -> PropValue {
        PropValue::List(self.into_iter().map(IntoPropValue::into_prop_value).collect())
    }
}

impl<K, V> IntoPropValue for BTreeMap<K, V>
where
    K: Into<String>,
    V: IntoPropValue,
{
    fn into_prop_value(self) -> PropValue {
        PropValue::Map(self.into_iter().collect())
    }
}

impl<K, V, S> IntoPropValue for HashMap<K, V, S>
where
    K: Into<String>,
    V: IntoPropValue,
{
    fn into_prop_value(self) -> PropValue {
        PropValue::Map(self.into_iter().collect())
    }
}
