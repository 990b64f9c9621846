// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use num_traits::Float;

/// A minutes-past-midnight instant that may be absent.
///
/// Instead of using `Option<T>`, this type uses a sentinel encoding to
/// avoid the additional discriminant that `Option` typically introduces
/// for scalar types. The subset sweep keeps one of these per `(subset,
/// last checkpoint)` state, so keeping the value to a single machine word
/// improves cache locality and reduces memory traffic.
///
/// Encoding:
/// - Finite values represent a concrete minute of the day.
/// - Non-finite values (positive infinity, NaN) indicate absence.
///
/// Positive infinity doubles as the identity for the minimization the
/// solver performs: any finite candidate departure improves on an absent
/// state under a plain `<` comparison.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct Minute<T>(T)
where
    T: Float;

impl<T> Minute<T>
where
    T: Float,
{
    /// Creates a `Minute` from an `Option<T>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use cairn_model::time::Minute;
    ///
    /// let some_minute = Minute::from_option(Some(617.0f32));
    /// assert!(some_minute.is_some());
    /// assert_eq!(some_minute.raw(), 617.0);
    ///
    /// let no_minute: Minute<f32> = Minute::from_option(None);
    /// assert!(no_minute.is_none());
    /// ```
    #[inline]
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Minute(v),
            None => Minute(T::infinity()),
        }
    }

    /// Creates a `Minute` representing a concrete instant.
    ///
    /// # Panics
    ///
    /// This function will panic if the provided value is not finite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use cairn_model::time::Minute;
    ///
    /// let minute = Minute::some(630.0f32);
    /// assert!(minute.is_some());
    /// assert_eq!(minute.raw(), 630.0);
    /// ```
    pub fn some(value: T) -> Self
    where
        T: std::fmt::Display,
    {
        assert!(
            value.is_finite(),
            "called `Minute::some` with a non-finite value: {}",
            value
        );

        Minute(value)
    }

    /// Creates a `Minute` representing absence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use cairn_model::time::Minute;
    ///
    /// let no_minute: Minute<f32> = Minute::none();
    /// assert!(no_minute.is_none());
    /// ```
    #[inline]
    pub fn none() -> Self {
        Minute(T::infinity())
    }

    /// Checks if the `Minute` represents absence.
    #[inline]
    pub fn is_none(&self) -> bool {
        !self.0.is_finite()
    }

    /// Checks if the `Minute` represents a concrete instant.
    #[inline]
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// Returns the raw value, including the sentinel if present.
    ///
    /// The sentinel compares greater than every concrete minute, which is
    /// what the solver's strict-`<` improvement checks rely on.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use cairn_model::time::Minute;
    ///
    /// let minute = Minute::some(600.5f32);
    /// assert_eq!(minute.raw(), 600.5);
    ///
    /// let no_minute: Minute<f32> = Minute::none();
    /// assert!(minute.raw() < no_minute.raw());
    /// ```
    #[inline]
    pub fn raw(&self) -> T {
        self.0
    }

    /// Converts the `Minute` back into an `Option<T>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use cairn_model::time::Minute;
    ///
    /// let minute = Minute::some(612.0f32);
    /// assert_eq!(minute.into_option(), Some(612.0));
    ///
    /// let no_minute: Minute<f32> = Minute::none();
    /// assert_eq!(no_minute.into_option(), None);
    /// ```
    #[inline]
    pub fn into_option(&self) -> Option<T> {
        if self.is_none() { None } else { Some(self.0) }
    }

    /// Unwraps the `Minute`, returning a default value if it is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use cairn_model::time::Minute;
    ///
    /// let minute = Minute::some(625.0f32);
    /// assert_eq!(minute.unwrap_or(0.0), 625.0);
    ///
    /// let no_minute: Minute<f32> = Minute::none();
    /// assert_eq!(no_minute.unwrap_or(0.0), 0.0);
    /// ```
    #[inline]
    pub fn unwrap_or(&self, default: T) -> T {
        if self.is_none() { default } else { self.0 }
    }
}

impl<T> std::fmt::Debug for Minute<T>
where
    T: Float + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "Minute(None)")
        } else {
            write!(f, "Minute(Some({:?}))", self.0)
        }
    }
}

impl<T> std::fmt::Display for Minute<T>
where
    T: Float + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "Minute(None)")
        } else {
            write!(f, "Minute({})", self.0)
        }
    }
}

impl<T> From<Option<T>> for Minute<T>
where
    T: Float,
{
    #[inline]
    fn from(value: Option<T>) -> Self {
        Minute::from_option(value)
    }
}

impl<T> From<Minute<T>> for Option<T>
where
    T: Float,
{
    #[inline]
    fn from(val: Minute<T>) -> Self {
        val.into_option()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_some_and_none_roundtrip() {
        let m = Minute::some(617.0f32);
        assert!(m.is_some());
        assert_eq!(m.into_option(), Some(617.0));

        let n: Minute<f32> = Minute::none();
        assert!(n.is_none());
        assert_eq!(n.into_option(), None);
    }

    #[test]
    fn test_from_option() {
        assert!(Minute::from_option(Some(600.0f32)).is_some());
        assert!(Minute::<f32>::from_option(None).is_none());
    }

    #[test]
    fn test_nan_counts_as_absent() {
        let m = Minute::from_option(Some(f32::NAN));
        assert!(m.is_none());
    }

    #[test]
    fn test_sentinel_orders_after_every_instant() {
        let late = Minute::some(1439.5f32);
        let absent: Minute<f32> = Minute::none();
        assert!(late.raw() < absent.raw());
    }

    #[test]
    #[should_panic(expected = "called `Minute::some` with a non-finite value")]
    fn test_some_panics_on_non_finite() {
        let _ = Minute::some(f32::INFINITY);
    }

    #[test]
    fn test_debug_and_display() {
        let m = Minute::some(630.0f32);
        assert_eq!(format!("{}", m), "Minute(630)");
        let n: Minute<f32> = Minute::none();
        assert_eq!(format!("{}", n), "Minute(None)");
        assert_eq!(format!("{:?}", n), "Minute(None)");
    }
}
