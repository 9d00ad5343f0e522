use std::marker::PhantomData;
use std::mem::MaybeUninit;

use super::node::NodeRef;

/// The circular chain substrate under [`List`](super::List) and the hash table.
///
/// A heap-allocated sentinel node closes the circle: `end.next` is the head, `end.prev`
/// is the tail, and an empty chain is the sentinel linked to itself. Every position
/// (including "past the end") is therefore a plain node handle, and include, exclude and
/// transmit are unconditional pointer splices with no edge cases for the ends.
pub(crate) struct RawList<T> {
    end: NodeRef<T>,
    len: usize,
    _phantom: PhantomData<T>,
}

impl<T> RawList<T> {
    pub fn new() -> RawList<T> {
        RawList {
            end: NodeRef::alloc(MaybeUninit::uninit()),
            len: 0,
            _phantom: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The sentinel: the position one past the tail and one before the head.
    pub fn end(&self) -> NodeRef<T> {
        self.end
    }

    pub fn head(&self) -> NodeRef<T> {
        self.end.next()
    }

    pub fn tail(&self) -> NodeRef<T> {
        self.end.prev()
    }

    pub fn is_end(&self, node: NodeRef<T>) -> bool {
        node == self.end
    }

    /// Allocates a node for `value` and splices it in before `anchor`. Splicing before
    /// the sentinel appends at the tail.
    ///
    /// # Safety
    /// `anchor` must be a node of this chain (the sentinel included).
    pub unsafe fn include_before(&mut self, anchor: NodeRef<T>, value: T) -> NodeRef<T> {
        let node = NodeRef::alloc(MaybeUninit::new(value));
        let prev = anchor.prev();

        node.set_prev(prev);
        node.set_next(anchor);
        prev.set_next(node);
        anchor.set_prev(node);

        self.len += 1;
        node
    }

    /// Unlinks `node` and returns its value, freeing the node.
    ///
    /// # Safety
    /// `node` must be a non-sentinel node of this chain, and no other handle may use it
    /// afterwards.
    pub unsafe fn exclude(&mut self, node: NodeRef<T>) -> T {
        debug_assert!(!self.is_end(node));

        node.prev().set_next(node.next());
        node.next().set_prev(node.prev());
        self.len -= 1;

        // SAFETY: Non-sentinel and now unlinked, per the contract.
        unsafe { node.take_value() }
    }

    /// Moves `node` out of `from` and splices it in before `anchor` in this chain. No
    /// allocation, no value is moved in memory.
    ///
    /// # Safety
    /// `node` must be a non-sentinel node of `from`, and `anchor` a node of this chain.
    /// `from` may be this chain itself.
    pub unsafe fn transmit(&mut self, from: &mut RawList<T>, node: NodeRef<T>, anchor: NodeRef<T>) {
        debug_assert!(!from.is_end(node));
        if node == anchor {
            return;
        }

        node.prev().set_next(node.next());
        node.next().set_prev(node.prev());
        from.len -= 1;

        let prev = anchor.prev();
        node.set_prev(prev);
        node.set_next(anchor);
        prev.set_next(node);
        anchor.set_prev(node);
        self.len += 1;
    }

    /// Splices `other`'s whole chain in before `anchor`, leaving `other` empty. O(1).
    ///
    /// # Safety
    /// `anchor` must be a node of this chain, and `other` must be a different list.
    pub unsafe fn splice_before(&mut self, anchor: NodeRef<T>, other: &mut RawList<T>) {
        if other.is_empty() {
            return;
        }

        let first = other.head();
        let last = other.tail();
        other.end.set_next(other.end);
        other.end.set_prev(other.end);

        let prev = anchor.prev();
        first.set_prev(prev);
        last.set_next(anchor);
        prev.set_next(first);
        anchor.set_prev(last);

        self.len += other.len;
        other.len = 0;
    }

    /// Drops every value and frees every node, leaving the chain empty.
    pub fn clear(&mut self) {
        let mut curr = self.head();
        while curr != self.end {
            let next = curr.next();
            // SAFETY: Every node between head and the sentinel is live, non-sentinel,
            // and visited exactly once; the chain is rebuilt as empty below.
            unsafe {
                drop(curr.take_value());
            }
            curr = next;
        }
        self.end.set_next(self.end);
        self.end.set_prev(self.end);
        self.len = 0;
    }
}

impl<T> Drop for RawList<T> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: The chain is empty, so only the sentinel remains, and its value slot
        // was never initialized.
        unsafe {
            self.end.free();
        }
    }
}
