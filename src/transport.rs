use std::sync::mpsc::{Receiver, TryRecvError};

use thiserror::Error;

pub const KEY_COUNT: usize = 16;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Edge {
    Rising,
    Falling,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EdgeEvent {
    pub key: usize,
    pub edge: Edge,
}

impl EdgeEvent {
    pub fn press(key: usize) -> Self {
        Self {
            key,
            edge: Edge::Rising,
        }
    }

    pub fn release(key: usize) -> Self {
        Self {
            key,
            edge: Edge::Falling,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum TransportError {
    #[error("input source disconnected")]
    Disconnected,

    #[error("bus error: {0}")]
    Bus(String),
}

pub trait EdgeObserver {
    fn on_edge(&mut self, event: EdgeEvent);
}

pub trait InputTransport {
    fn arm(&mut self, key: usize, edge: Edge, enabled: bool);

    // Every armed edge pending at the time of the call reaches the observer before returning
    fn sync(&mut self, observer: &mut dyn EdgeObserver) -> Result<(), TransportError>;

    fn arm_all(&mut self) {
        for key in 0..KEY_COUNT {
            self.arm(key, Edge::Rising, true);
            self.arm(key, Edge::Falling, true);
        }
    }
}

// Per key, per edge delivery switches. Nothing is armed initially.
#[derive(Debug, Clone, Default)]
pub struct ArmedEdges {
    slots: [[bool; 2]; KEY_COUNT],
}

impl ArmedEdges {
    pub fn set(&mut self, key: usize, edge: Edge, enabled: bool) {
        match self.slots.get_mut(key) {
            Some(slots) => slots[edge_slot(edge)] = enabled,
            None => log::warn!("Ignoring arm request for key {}", key),
        }
    }

    pub fn is_armed(&self, key: usize, edge: Edge) -> bool {
        self.slots
            .get(key)
            .map_or(false, |slots| slots[edge_slot(edge)])
    }

    pub fn admits(&self, event: &EdgeEvent) -> bool {
        // Out of range keys are passed through so the observer can flag them
        event.key >= KEY_COUNT || self.is_armed(event.key, event.edge)
    }

    pub fn deliver(&self, event: EdgeEvent, observer: &mut dyn EdgeObserver) {
        if self.admits(&event) {
            observer.on_edge(event);
        } else {
            log::trace!("Dropping unarmed {:?}", event);
        }
    }
}

// Edge source fed through a channel by a producer thread
pub struct ChannelTransport {
    receiver: Receiver<EdgeEvent>,
    armed: ArmedEdges,
}

impl ChannelTransport {
    pub fn new(receiver: Receiver<EdgeEvent>) -> Self {
        Self {
            receiver,
            armed: ArmedEdges::default(),
        }
    }

    pub fn is_armed(&self, key: usize, edge: Edge) -> bool {
        self.armed.is_armed(key, edge)
    }
}

impl InputTransport for ChannelTransport {
    fn arm(&mut self, key: usize, edge: Edge, enabled: bool) {
        self.armed.set(key, edge, enabled);
    }

    fn sync(&mut self, observer: &mut dyn EdgeObserver) -> Result<(), TransportError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => self.armed.deliver(event, observer),
                Err(TryRecvError::Empty) => return Ok(()),
                Err(TryRecvError::Disconnected) => return Err(TransportError::Disconnected),
            }
        }
    }
}

#[inline]
fn edge_slot(edge: Edge) -> usize {
    match edge {
        Edge::Rising => 0,
        Edge::Falling => 1,
    }
}
