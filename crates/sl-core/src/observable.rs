//! Observable state primitives.
//!
//! 可观察状态原语。
//!
//! The presentation layer never polls: it holds read-only handles and waits
//! for change notifications. Controllers own the writable side.
//!
//! - [`Observable`] is a single-value subject. Every mutation runs under the
//!   underlying channel's write lock, so one subject never observes a
//!   partially applied transition.
//! - [`ReadOnly`] is the consumer handle. Dropping it unsubscribes.
//! - [`Derived`] tracks exactly two inputs and recomputes its output from the
//!   current input pair on every read.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

/// A cloneable single-value subject.
///
/// Clones share the same value; the subject lives as long as any clone.
pub struct Observable<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Observable").field(&*self.tx.borrow()).finish()
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Run `f` against the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.tx.borrow())
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Mutate the value in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Mutate the value in place; subscribers are notified only when `f`
    /// returns `true`.
    pub fn update_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        self.tx.send_if_modified(f)
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    pub fn read_only(&self) -> ReadOnly<T> {
        ReadOnly {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone> Observable<T> {
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}

/// Read-only view of an [`Observable`].
///
/// 只读句柄，丢弃即取消订阅。
pub struct ReadOnly<T> {
    rx: watch::Receiver<T>,
}

impl<T> Clone for ReadOnly<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ReadOnly<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReadOnly").field(&*self.rx.borrow()).finish()
    }
}

impl<T> ReadOnly<T> {
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.rx.borrow())
    }

    /// Wait for the next change.
    ///
    /// Returns `false` once every writable handle has been dropped.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Wait until `predicate` holds for the current value.
    ///
    /// Returns `false` if the source goes away first.
    pub async fn wait_for(&mut self, predicate: impl FnMut(&T) -> bool) -> bool {
        self.rx.wait_for(predicate).await.is_ok()
    }

    /// Fresh receiver for consumers that want the raw channel.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.rx.clone()
    }
}

impl<T: Clone> ReadOnly<T> {
    pub fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Current value, marking it as seen for [`ReadOnly::changed`].
    pub fn get_and_mark_seen(&mut self) -> T {
        self.rx.borrow_and_update().clone()
    }
}

type Compute<A, B, O> = dyn Fn(&A, &B) -> O + Send + Sync;

/// A value derived from two tracked inputs.
///
/// 由两个输入派生的值。每次读取都基于当前输入重新计算，不缓存结果。
pub struct Derived<A, B, O> {
    left: watch::Receiver<A>,
    right: watch::Receiver<B>,
    compute: Arc<Compute<A, B, O>>,
}

impl<A, B, O> Clone for Derived<A, B, O> {
    fn clone(&self) -> Self {
        Self {
            left: self.left.clone(),
            right: self.right.clone(),
            compute: Arc::clone(&self.compute),
        }
    }
}

impl<A, B, O> Derived<A, B, O> {
    pub fn new(
        left: &ReadOnly<A>,
        right: &ReadOnly<B>,
        compute: impl Fn(&A, &B) -> O + Send + Sync + 'static,
    ) -> Self {
        Self {
            left: left.subscribe(),
            right: right.subscribe(),
            compute: Arc::new(compute),
        }
    }

    /// Recompute from the current input pair.
    pub fn get(&self) -> O {
        let left = self.left.borrow();
        let right = self.right.borrow();
        (self.compute)(&*left, &*right)
    }

    /// Recompute and mark both inputs as seen.
    pub fn get_and_mark_seen(&mut self) -> O {
        let left = self.left.borrow_and_update();
        let right = self.right.borrow_and_update();
        (self.compute)(&*left, &*right)
    }

    /// Wait until either input changes.
    ///
    /// Returns `false` once both inputs have gone away.
    pub async fn changed(&mut self) -> bool {
        tokio::select! {
            res = self.left.changed() => {
                if res.is_ok() {
                    return true;
                }
                self.right.changed().await.is_ok()
            }
            res = self.right.changed() => {
                if res.is_ok() {
                    return true;
                }
                self.left.changed().await.is_ok()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_if_only_notifies_on_change() {
        let subject = Observable::new(vec![1, 2]);
        let mut rx = subject.subscribe();
        rx.borrow_and_update();

        assert!(!subject.update_if(|_| false));
        assert!(!rx.has_changed().unwrap());

        assert!(subject.update_if(|v| {
            v.push(3);
            true
        }));
        assert!(rx.has_changed().unwrap());
        assert_eq!(subject.get(), vec![1, 2, 3]);
    }

    #[test]
    fn test_clones_share_value() {
        let subject = Observable::new(0);
        let other = subject.clone();
        other.set(7);
        assert_eq!(subject.get(), 7);
    }

    #[test]
    fn test_dropping_read_only_unsubscribes() {
        let subject = Observable::new(0u8);
        let reader = subject.read_only();
        assert_eq!(subject.subscriber_count(), 1);
        drop(reader);
        assert_eq!(subject.subscriber_count(), 0);
    }

    #[test]
    fn test_derived_recomputes_from_both_inputs() {
        let factor = Observable::new(2);
        let values = Observable::new(vec![1, 2, 3]);
        let derived = Derived::new(&factor.read_only(), &values.read_only(), |f, v| {
            v.iter().map(|x| x * f).collect::<Vec<_>>()
        });

        assert_eq!(derived.get(), vec![2, 4, 6]);
        factor.set(10);
        assert_eq!(derived.get(), vec![10, 20, 30]);
        values.set(vec![5]);
        assert_eq!(derived.get(), vec![50]);
    }

    #[tokio::test]
    async fn test_derived_changed_fires_for_either_input() {
        let left = Observable::new(1);
        let right = Observable::new(1);
        let mut derived = Derived::new(&left.read_only(), &right.read_only(), |a, b| a + b);
        derived.get_and_mark_seen();

        right.set(5);
        assert!(derived.changed().await);
        assert_eq!(derived.get_and_mark_seen(), 6);

        left.set(4);
        assert!(derived.changed().await);
        assert_eq!(derived.get_and_mark_seen(), 9);
    }

    #[tokio::test]
    async fn test_read_only_reports_closed_source() {
        let subject = Observable::new(0);
        let mut reader = subject.read_only();
        drop(subject);
        assert!(!reader.changed().await);
    }
}
