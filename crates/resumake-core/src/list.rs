//! Index-based list operations
//!
//! List sections are reordered and trimmed by position, never by identity.
//! Every operation is total: an index outside the list leaves it untouched.

/// Append a default element, returning its index
pub fn append_default<T: Default>(items: &mut Vec<T>) -> usize {
    items.push(T::default());
    items.len() - 1
}

/// Remove the element at `index`, keeping the others in order
pub fn remove<T>(items: &mut Vec<T>, index: usize) -> Option<T> {
    (index < items.len()).then(|| items.remove(index))
}

/// Swap `index` with its predecessor. No-op for the first element.
pub fn move_up<T>(items: &mut [T], index: usize) -> bool {
    if index == 0 || index >= items.len() {
        return false;
    }
    items.swap(index - 1, index);
    true
}

/// Swap `index` with its successor. No-op for the last element.
pub fn move_down<T>(items: &mut [T], index: usize) -> bool {
    if index + 1 >= items.len() {
        return false;
    }
    items.swap(index, index + 1);
    true
}
