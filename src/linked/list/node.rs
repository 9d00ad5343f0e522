use std::mem::MaybeUninit;
use std::ptr::NonNull;

// NOTE: Nodes are allocated through Box and leaked into raw handles, so that freeing a
// node is just re-boxing it. The value lives in a MaybeUninit slot because the sentinel
// node shares this layout without ever holding a value.

pub(crate) struct Node<T> {
    pub prev: NonNull<Node<T>>,
    pub next: NonNull<Node<T>>,
    pub value: MaybeUninit<T>,
}

/// Copyable handle to one heap node of a circular chain.
pub(crate) struct NodeRef<T>(pub NonNull<Node<T>>);

impl<T> NodeRef<T> {
    /// Allocates a node linked to itself, carrying `value`.
    pub fn alloc(value: MaybeUninit<T>) -> NodeRef<T> {
        let node = NodeRef(NonNull::from(Box::leak(Box::new(Node {
            prev: NonNull::dangling(),
            next: NonNull::dangling(),
            value,
        }))));
        node.set_prev(node);
        node.set_next(node);
        node
    }

    pub fn prev(self) -> NodeRef<T> {
        // SAFETY: Every node in a chain stays allocated until excluded, and its links
        // always point at live nodes of the same chain.
        NodeRef(unsafe { (*self.0.as_ptr()).prev })
    }

    pub fn next(self) -> NodeRef<T> {
        // SAFETY: As for prev.
        NodeRef(unsafe { (*self.0.as_ptr()).next })
    }

    pub fn set_prev(self, prev: NodeRef<T>) {
        // SAFETY: The node is live; only the link is written.
        unsafe {
            (*self.0.as_ptr()).prev = prev.0;
        }
    }

    pub fn set_next(self, next: NodeRef<T>) {
        // SAFETY: As for set_prev.
        unsafe {
            (*self.0.as_ptr()).next = next.0;
        }
    }

    /// # Safety
    /// The node must not be the sentinel: only non-sentinel nodes hold an initialized
    /// value.
    pub unsafe fn value<'a>(self) -> &'a T {
        // SAFETY: Initialized per the contract.
        unsafe { (*self.0.as_ptr()).value.assume_init_ref() }
    }

    /// # Safety
    /// As for [`NodeRef::value`], and the caller must hold exclusive access to the chain.
    pub unsafe fn value_mut<'a>(self) -> &'a mut T {
        // SAFETY: Initialized per the contract.
        unsafe { (*self.0.as_ptr()).value.assume_init_mut() }
    }

    /// Moves the value out and frees the node.
    ///
    /// # Safety
    /// The node must not be the sentinel, must be unlinked from any chain, and no other
    /// handle may use it afterwards.
    pub unsafe fn take_value(self) -> T {
        // SAFETY: Re-boxing the leaked allocation; the MaybeUninit wrapper stops the box
        // from dropping the value a second time.
        let node = unsafe { Box::from_raw(self.0.as_ptr()) };
        // SAFETY: Initialized per the contract.
        unsafe { node.value.assume_init() }
    }

    /// Frees the node without touching its value slot. Used for the sentinel.
    ///
    /// # Safety
    /// No other handle may use the node afterwards, and its value slot must be
    /// uninitialized (or already moved out).
    pub unsafe fn free(self) {
        // SAFETY: Re-boxing the leaked allocation.
        drop(unsafe { Box::from_raw(self.0.as_ptr()) });
    }
}

impl<T> Clone for NodeRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<T> {}

impl<T> PartialEq for NodeRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
