//! Bidirectional positional cursor over an owned sequence
//!
//! Backs both the per-session page list and the per-page item list. The
//! cursor starts unpositioned: the first forward step lands on element 0 and
//! reading the current element before any step also yields element 0.

use crate::error::{Direction, SearchError, SearchResult};

/// An ordered, append-only sequence with a current position
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor<T> {
    elements: Vec<T>,
    position: Option<usize>,
}

impl<T> Default for Cursor<T> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            position: None,
        }
    }
}

impl<T> From<Vec<T>> for Cursor<T> {
    fn from(elements: Vec<T>) -> Self {
        Self {
            elements,
            position: None,
        }
    }
}

impl<T> Cursor<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Index of the current element, if any step has been taken.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Whether a forward step would stay inside the sequence.
    pub fn has_next(&self) -> bool {
        match self.position {
            None => !self.elements.is_empty(),
            Some(pos) => pos + 1 < self.elements.len(),
        }
    }

    pub fn last(&self) -> Option<&T> {
        self.elements.last()
    }

    /// Append an element without moving the position.
    pub fn push(&mut self, element: T) {
        self.elements.push(element);
    }

    fn current_index(&self) -> SearchResult<usize> {
        if self.elements.is_empty() {
            return Err(SearchError::EmptySequence);
        }
        Ok(self.position.unwrap_or(0))
    }

    pub fn current(&self) -> SearchResult<&T> {
        let index = self.current_index()?;
        Ok(&self.elements[index])
    }

    pub fn current_mut(&mut self) -> SearchResult<&mut T> {
        let index = self.current_index()?;
        Ok(&mut self.elements[index])
    }

    /// Step forward and return the new current element.
    pub fn advance(&mut self) -> SearchResult<&mut T> {
        if self.elements.is_empty() {
            return Err(SearchError::EmptySequence);
        }
        if !self.has_next() {
            return Err(SearchError::NavigationExhausted(Direction::Forward));
        }
        let next = self.position.map_or(0, |pos| pos + 1);
        self.position = Some(next);
        Ok(&mut self.elements[next])
    }

    /// Step backward and return the new current element.
    pub fn retreat(&mut self) -> SearchResult<&mut T> {
        if self.elements.is_empty() {
            return Err(SearchError::EmptySequence);
        }
        match self.position {
            Some(pos) if pos > 0 => {
                self.position = Some(pos - 1);
                Ok(&mut self.elements[pos - 1])
            }
            _ => Err(SearchError::NavigationExhausted(Direction::Backward)),
        }
    }
}
