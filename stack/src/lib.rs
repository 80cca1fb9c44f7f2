#![forbid(unsafe_code)]

use log::trace;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("stack is empty")]
pub struct EmptyContainerError;

////////////////////////////////////////////////////////////////////////////////

// Each node owns the one below it
struct Node<T> {
    value: T,
    next: Option<Box<Node<T>>>,
}

/// LIFO stack over a singly-linked chain of owned nodes.
pub struct LinkedStack<T> {
    first: Option<Box<Node<T>>>,
    size: usize,
}

impl<T> Default for LinkedStack<T> {
    fn default() -> Self {
        LinkedStack::new()
    }
}

impl<T> LinkedStack<T> {
    pub fn new() -> Self {
        LinkedStack {
            first: None,
            size: 0,
        }
    }

    pub fn push(&mut self, value: T) {
        if self.first.is_none() {
            trace!("stack becomes non-empty");
        }
        let new_node = Box::new(Node {
            value,
            next: self.first.take(),
        });
        self.first = Some(new_node);
        self.size += 1;
    }

    pub fn pop(&mut self) -> Result<T, EmptyContainerError> {
        match self.first.take() {
            Some(node) => {
                let Node { value, next } = *node;
                self.first = next;
                self.size -= 1;
                if self.first.is_none() {
                    trace!("stack drained");
                }
                Ok(value)
            }
            None => {
                trace!("pop rejected on empty stack");
                Err(EmptyContainerError)
            }
        }
    }

    pub fn peek(&self) -> Option<&T> {
        self.first.as_ref().map(|node| &node.value)
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

impl<T> Drop for LinkedStack<T> {
    fn drop(&mut self) {
        // unlink one by one, the default drop would recurse down the chain
        let mut current = self.first.take();
        while let Some(mut node) = current {
            current = node.next.take();
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
