// SPDX-License-Identifier: MIT OR Apache-2.0

//! The textual-conversion contract for message arguments.
//!
//! Every value passed to a logging call implements [`Loggable`], which writes the value's
//! default textual representation into a [`LogBuilder`].  Nothing is converted implicitly:
//! a type without a `Loggable` impl can be wrapped in [`LogDisplay`] or [`LogDebug`].
//!
//! ```
//! use xtiloger::loggable::{Loggable, LogDebug};
//!
//! let mut out = String::new();
//! 42u8.log_all(&mut out);
//! " items ".log_all(&mut out);
//! LogDebug(vec![1, 2]).log_all(&mut out);
//! assert_eq!(out, "42 items [1, 2]");
//! ```

use std::fmt::{Debug, Display};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

/// an in-progress log.
pub trait LogBuilder {
    fn write(&mut self, message: &str);
}

impl LogBuilder for String {
    #[inline]
    fn write(&mut self, message: &str) {
        self.push_str(message);
    }
}

/**
A typed view of a value, used by `%` conversions in message templates.

A `%d` marker formats a [TypedValue::Signed] or [TypedValue::Unsigned] argument as a number;
any other argument falls back to its default textual form.
*/
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypedValue {
    Signed(i128),
    Unsigned(u128),
    Float(f64),
    Char(char),
}

pub trait Loggable {
    /**
    Writes the default textual representation of the value.

    When implementing this, use of `#[inline]` is recommended.
    */
    fn log_all(&self, builder: &mut dyn LogBuilder);

    /**
    The typed value for `%` conversions, if the value has one.

    Defaults to `None`, which makes every conversion fall back to [Loggable::log_all].
    */
    fn typed_value(&self) -> Option<TypedValue> {
        None
    }
}

/// Reduces a value to its default textual representation.
pub fn to_log_string(value: &dyn Loggable) -> String {
    let mut out = String::new();
    value.log_all(&mut out);
    out
}

macro_rules! loggable_integer {
    ($variant:ident, $wide:ty, $($t:ty),+) => {
        $(
            impl Loggable for $t {
                #[inline]
                fn log_all(&self, builder: &mut dyn LogBuilder) {
                    builder.write(&self.to_string());
                }
                #[inline]
                fn typed_value(&self) -> Option<TypedValue> {
                    Some(TypedValue::$variant(*self as $wide))
                }
            }
        )+
    };
}

loggable_integer!(Signed, i128, i8, i16, i32, i64, i128, isize);
loggable_integer!(Unsigned, u128, u8, u16, u32, u64, u128, usize);

impl Loggable for f32 {
    #[inline]
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        builder.write(&self.to_string());
    }
    #[inline]
    fn typed_value(&self) -> Option<TypedValue> {
        Some(TypedValue::Float(f64::from(*self)))
    }
}

impl Loggable for f64 {
    #[inline]
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        builder.write(&self.to_string());
    }
    #[inline]
    fn typed_value(&self) -> Option<TypedValue> {
        Some(TypedValue::Float(*self))
    }
}

impl Loggable for bool {
    #[inline]
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        builder.write(if *self { "true" } else { "false" });
    }
}

impl Loggable for char {
    #[inline]
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        let mut buf = [0u8; 4];
        builder.write(self.encode_utf8(&mut buf));
    }
    #[inline]
    fn typed_value(&self) -> Option<TypedValue> {
        Some(TypedValue::Char(*self))
    }
}

impl Loggable for str {
    #[inline]
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        builder.write(self);
    }
}

impl Loggable for String {
    #[inline]
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        builder.write(self);
    }
}

impl Loggable for Path {
    #[inline]
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        builder.write(&self.display().to_string());
    }
}

impl Loggable for PathBuf {
    #[inline]
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        self.as_path().log_all(builder);
    }
}

impl Loggable for std::time::Duration {
    #[inline]
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        builder.write(&format!("{:?}", self));
    }
}

impl Loggable for crate::Level {
    #[inline]
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        builder.write(&self.to_string());
    }
}

/// `None` logs as `nil`, `Some(v)` logs as `v`.
impl<T: Loggable> Loggable for Option<T> {
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        match self {
            Some(value) => value.log_all(builder),
            None => builder.write("nil"),
        }
    }
    fn typed_value(&self) -> Option<TypedValue> {
        self.as_ref().and_then(Loggable::typed_value)
    }
}

impl<T: Loggable + ?Sized> Loggable for &T {
    #[inline]
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        (**self).log_all(builder);
    }
    #[inline]
    fn typed_value(&self) -> Option<TypedValue> {
        (**self).typed_value()
    }
}

impl<T: Loggable + ?Sized> Loggable for Box<T> {
    #[inline]
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        (**self).log_all(builder);
    }
    #[inline]
    fn typed_value(&self) -> Option<TypedValue> {
        (**self).typed_value()
    }
}

impl<T: Loggable + ?Sized> Loggable for Arc<T> {
    #[inline]
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        (**self).log_all(builder);
    }
    #[inline]
    fn typed_value(&self) -> Option<TypedValue> {
        (**self).typed_value()
    }
}

impl<T: Loggable + ?Sized> Loggable for Rc<T> {
    #[inline]
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        (**self).log_all(builder);
    }
    #[inline]
    fn typed_value(&self) -> Option<TypedValue> {
        (**self).typed_value()
    }
}

/**
Logs any [Display] value through its `Display` impl.

```
use xtiloger::loggable::{LogDisplay, to_log_string};
let addr: std::net::Ipv4Addr = "127.0.0.1".parse().unwrap();
assert_eq!(to_log_string(&LogDisplay(addr)), "127.0.0.1");
```
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LogDisplay<T>(pub T);

impl<T: Display> Loggable for LogDisplay<T> {
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        builder.write(&self.0.to_string());
    }
}

/// Logs any [Debug] value through its `Debug` impl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LogDebug<T>(pub T);

impl<T: Debug> Loggable for LogDebug<T> {
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        builder.write(&format!("{:?}", self.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_use_their_natural_text() {
        assert_eq!(to_log_string(&-5i32), "-5");
        assert_eq!(to_log_string(&1.5f64), "1.5");
        assert_eq!(to_log_string(&true), "true");
        assert_eq!(to_log_string(&'é'), "é");
        assert_eq!(to_log_string(&String::from("owned")), "owned");
        assert_eq!(to_log_string(&crate::Level::Warning), "warning");
    }

    #[test]
    fn options_and_wrappers() {
        assert_eq!(to_log_string(&Some(3u8)), "3");
        assert_eq!(to_log_string(&None::<u8>), "nil");
        assert_eq!(to_log_string(&Arc::new("shared")), "shared");
        assert_eq!(to_log_string(&LogDebug(("a", 1))), "(\"a\", 1)");
    }

    #[test]
    fn typed_values() {
        assert_eq!(7u16.typed_value(), Some(TypedValue::Unsigned(7)));
        assert_eq!((-7i64).typed_value(), Some(TypedValue::Signed(-7)));
        assert_eq!("text".typed_value(), None);
        assert_eq!((&&2.0f32).typed_value(), Some(TypedValue::Float(2.0)));
    }
}
