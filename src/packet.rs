use std::collections::VecDeque;

/// A unit of queued traffic. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    payload_id: String,
    size_bytes: u32,
    created_at_us: f64,
}

impl Packet {
    pub fn new(payload_id: impl Into<String>, size_bytes: u32, created_at_us: f64) -> Packet {
        Packet {
            payload_id: payload_id.into(),
            size_bytes,
            created_at_us,
        }
    }

    pub fn payload_id(&self) -> &str {
        &self.payload_id
    }

    pub fn size_bytes(&self) -> u32 {
        self.size_bytes
    }

    pub fn created_at_us(&self) -> f64 {
        self.created_at_us
    }
}

/// FIFO of pending packets: push at the tail, pop at the head.
#[derive(Debug, Default, Clone)]
pub struct PacketQueue {
    packets: VecDeque<Packet>,
}

impl PacketQueue {
    pub fn new() -> PacketQueue {
        PacketQueue::default()
    }

    pub fn push(&mut self, packet: Packet) {
        self.packets.push_back(packet);
    }

    pub fn pop(&mut self) -> Option<Packet> {
        self.packets.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn front(&self) -> Option<&Packet> {
        self.packets.front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_is_fifo() {
        let mut queue = PacketQueue::new();
        queue.push(Packet::new("Data0", 100, 0.0));
        queue.push(Packet::new("Data1", 200, 0.0));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.front().map(Packet::payload_id), Some("Data0"));
        assert_eq!(queue.pop().map(|p| p.size_bytes()), Some(100));
        assert_eq!(queue.pop().map(|p| p.size_bytes()), Some(200));
        assert!(queue.pop().is_none());
        assert!(queue.is_empty());
    }
}
