use super::linked_list::List;
use super::node::NodeRef;

pub use crate::util::error::EraseEnd;

/// A mutable cursor over a [`List`].
///
/// The cursor sits on either an element or the list's end position (the sentinel that
/// closes the circular chain). Movement wraps through the end position: stepping forward
/// from the last element parks on the end, and stepping forward again lands on the first
/// element. Editing around the cursor is O(1).
pub struct CursorMut<'a, T> {
    list: &'a mut List<T>,
    curr: NodeRef<T>,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn at(list: &'a mut List<T>, curr: NodeRef<T>) -> CursorMut<'a, T> {
        CursorMut { list, curr }
    }

    /// True while the cursor is parked on the end position rather than an element.
    pub fn is_end(&self) -> bool {
        self.list.raw.is_end(self.curr)
    }

    pub fn current(&self) -> Option<&T> {
        if self.is_end() {
            return None;
        }
        // SAFETY: Not the sentinel, so the node holds a value; the chain is borrowed for
        // the cursor's lifetime.
        Some(unsafe { self.curr.value() })
    }

    pub fn current_mut(&mut self) -> Option<&mut T> {
        if self.is_end() {
            return None;
        }
        // SAFETY: As for current, with exclusive access through the &mut borrow.
        Some(unsafe { self.curr.value_mut() })
    }

    /// Steps to the next position, wrapping through the end.
    pub fn move_next(&mut self) {
        self.curr = self.curr.next();
    }

    /// Steps to the previous position, wrapping through the end.
    pub fn move_prev(&mut self) {
        self.curr = self.curr.prev();
    }

    pub fn peek_next(&self) -> Option<&T> {
        let next = self.curr.next();
        if self.list.raw.is_end(next) {
            return None;
        }
        // SAFETY: Not the sentinel.
        Some(unsafe { next.value() })
    }

    pub fn peek_prev(&self) -> Option<&T> {
        let prev = self.curr.prev();
        if self.list.raw.is_end(prev) {
            return None;
        }
        // SAFETY: Not the sentinel.
        Some(unsafe { prev.value() })
    }

    /// Inserts `value` before the cursor's position. On the end position this appends at
    /// the back.
    pub fn insert_before(&mut self, value: T) {
        // SAFETY: curr is a node of the cursor's own chain.
        unsafe {
            self.list.raw.include_before(self.curr, value);
        }
    }

    /// Inserts `value` after the cursor's position. On the end position this prepends at
    /// the front.
    pub fn insert_after(&mut self, value: T) {
        let anchor = self.curr.next();
        // SAFETY: As for insert_before.
        unsafe {
            self.list.raw.include_before(anchor, value);
        }
    }

    /// Removes and returns the element under the cursor, which then moves to the next
    /// position. The end position holds no element and can't be erased.
    pub fn remove_current(&mut self) -> Result<T, EraseEnd> {
        if self.is_end() {
            return Err(EraseEnd);
        }
        let node = self.curr;
        self.curr = node.next();
        // SAFETY: Not the sentinel, and a node of the cursor's own chain.
        Ok(unsafe { self.list.raw.exclude(node) })
    }
}
