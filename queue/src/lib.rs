#![forbid(unsafe_code)]

use log::trace;
use slab::Slab;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot dequeue from an empty queue")]
pub struct EmptyContainerError;

////////////////////////////////////////////////////////////////////////////////

// Capacity kept by a drained queue; anything above is handed back
const RETAINED_CAPACITY: usize = 64;

type NodeId = usize;

struct Node<T> {
    value: T,
    next: Option<NodeId>,
}

////////////////////////////////////////////////////////////////////////////////

/// FIFO queue over a singly-linked chain.
///
/// Values leave from `first` and join after `last`. `last` is a plain key,
/// ownership of every node stays with the slab.
pub struct LinkedQueue<T> {
    nodes: Slab<Node<T>>,
    first: Option<NodeId>,
    last: Option<NodeId>,
    size: usize,
}

impl<T> Default for LinkedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinkedQueue<T> {
    pub fn new() -> Self {
        Self {
            nodes: Slab::new(),
            first: None,
            last: None,
            size: 0,
        }
    }

    pub fn enqueue(&mut self, value: T) {
        let id = self.nodes.insert(Node { value, next: None });
        match self.last.and_then(|last| self.nodes.get_mut(last)) {
            Some(tail) => tail.next = Some(id),
            None => {
                trace!("queue becomes non-empty");
                self.first = Some(id);
            }
        }
        self.last = Some(id);
        self.size += 1;
    }

    pub fn dequeue(&mut self) -> Result<T, EmptyContainerError> {
        let Some(node) = self.first.and_then(|first| self.nodes.try_remove(first)) else {
            trace!("dequeue rejected on empty queue");
            return Err(EmptyContainerError);
        };
        self.first = node.next;
        self.size -= 1;
        if self.first.is_none() {
            trace!("queue drained");
            self.last = None;
            self.nodes.clear();
            if self.nodes.capacity() > RETAINED_CAPACITY {
                self.nodes.shrink_to_fit();
            }
        }
        Ok(node.value)
    }

    pub fn peek(&self) -> Option<&T> {
        self.first
            .and_then(|first| self.nodes.get(first))
            .map(|node| &node.value)
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn check_ends<T>(queue: &LinkedQueue<T>) {
        assert_eq!(queue.first.is_none(), queue.last.is_none());
        assert_eq!(queue.first.is_none(), queue.size == 0);
        if let Some(last) = queue.last {
            assert!(queue.nodes.get(last).map_or(false, |n| n.next.is_none()));
        }
    }

    #[test]
    fn ends_stay_coherent() {
        let mut queue = LinkedQueue::new();
        check_ends(&queue);
        for i in 0..4 {
            queue.enqueue(i);
            check_ends(&queue);
        }
        while queue.dequeue().is_ok() {
            check_ends(&queue);
        }
        check_ends(&queue);
    }

    #[test]
    fn slots_are_reused() {
        let mut queue = LinkedQueue::new();
        queue.enqueue(0);
        queue.enqueue(1);
        for i in 2..1000 {
            queue.enqueue(i);
            check_ends(&queue);
            assert_eq!(queue.dequeue(), Ok(i - 2));
            check_ends(&queue);
        }
        assert_eq!(queue.len(), 2);
        assert!(queue.nodes.capacity() <= 4);
    }

    #[test]
    fn drained_queue_releases_storage() {
        let mut queue = LinkedQueue::new();
        for i in 0..100_000u64 {
            queue.enqueue([i; 16]);
        }
        assert!(queue.nodes.capacity() >= 100_000);

        while queue.dequeue().is_ok() {}
        assert!(queue.nodes.is_empty());
        assert!(queue.nodes.capacity() <= RETAINED_CAPACITY);

        queue.enqueue([7; 16]);
        check_ends(&queue);
        assert_eq!(queue.peek(), Some(&[7; 16]));
        assert!(queue.nodes.capacity() <= RETAINED_CAPACITY);
    }

    #[test]
    fn error_message() {
        assert_eq!(
            EmptyContainerError.to_string(),
            "cannot dequeue from an empty queue"
        );
    }
}
