#![forbid(unsafe_code)]

//! Touch interception.
//!
//! A child view that handles its own touches (a slider inside the drawer,
//! say) registers a [`TouchInterceptor`]. Before the drawer reacts to a tap
//! or starts a pan it asks every interceptor in registration order and
//! backs off at the first one that claims the touch.

use std::fmt;

use drawerkit_core::geometry::Point;

/// A child that may claim touches for itself.
pub trait TouchInterceptor {
    /// `true` if the touch at `location` (container coordinates) belongs to
    /// this child and the drawer should ignore it.
    fn intercepts_touch(&self, location: Point) -> bool;
}

impl<F> TouchInterceptor for F
where
    F: Fn(Point) -> bool,
{
    fn intercepts_touch(&self, location: Point) -> bool {
        self(location)
    }
}

/// Ordered set of interceptors.
#[derive(Default)]
pub struct InterceptorSet {
    interceptors: Vec<Box<dyn TouchInterceptor>>,
}

impl fmt::Debug for InterceptorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorSet")
            .field("len", &self.interceptors.len())
            .finish()
    }
}

impl InterceptorSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, interceptor: Box<dyn TouchInterceptor>) {
        self.interceptors.push(interceptor);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Stops at the first interceptor that claims the touch.
    pub fn intercepts(&self, location: Point) -> bool {
        self.interceptors
            .iter()
            .any(|interceptor| interceptor.intercepts_touch(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counting {
        claims: bool,
        calls: Rc<Cell<usize>>,
    }

    impl TouchInterceptor for Counting {
        fn intercepts_touch(&self, _location: Point) -> bool {
            self.calls.set(self.calls.get() + 1);
            self.claims
        }
    }

    #[test]
    fn empty_set_never_intercepts() {
        let set = InterceptorSet::new();
        assert!(set.is_empty());
        assert!(!set.intercepts(Point::ZERO));
    }

    #[test]
    fn short_circuits_on_first_claim() {
        let calls: Vec<_> = (0..3).map(|_| Rc::new(Cell::new(0))).collect();
        let mut set = InterceptorSet::new();
        for (i, counter) in calls.iter().enumerate() {
            set.push(Box::new(Counting {
                claims: i == 1,
                calls: Rc::clone(counter),
            }));
        }
        assert!(set.intercepts(Point::new(5.0, 5.0)));
        assert_eq!(calls[0].get(), 1);
        assert_eq!(calls[1].get(), 1);
        assert_eq!(calls[2].get(), 0);
    }

    #[test]
    fn closures_are_interceptors() {
        let mut set = InterceptorSet::new();
        set.push(Box::new(|p: Point| p.x < 10.0));
        assert_eq!(set.len(), 1);
        assert!(set.intercepts(Point::new(3.0, 0.0)));
        assert!(!set.intercepts(Point::new(30.0, 0.0)));
    }
}
