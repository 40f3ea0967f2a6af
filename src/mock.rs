//! Test doubles shared by the unit tests

use alloc::vec::Vec;
use embedded_hal::delay::DelayNs;

use crate::command::MEMORY_SIZE;
use crate::interface::ControllerInterface;

/// One transaction seen by [`MockInterface`]
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Idle,
    Command(u16),
    Write(u8, Vec<u8>),
}

/// Records transactions and models the controller's display memory
#[derive(Debug)]
pub struct MockInterface {
    pub ops: Vec<Op>,
    pub memory: [u8; MEMORY_SIZE as usize],
}

impl MockInterface {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            // garbage so blanking is observable
            memory: [0x5; MEMORY_SIZE as usize],
        }
    }

    pub fn commands(&self) -> Vec<u16> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Command(cmd) => Some(*cmd),
                _ => None,
            })
            .collect()
    }

    pub fn writes(&self) -> Vec<(u8, Vec<u8>)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Write(address, nibbles) => Some((*address, nibbles.clone())),
                _ => None,
            })
            .collect()
    }
}

impl ControllerInterface for MockInterface {
    type Error = core::convert::Infallible;

    fn write_command(&mut self, command: u16) -> Result<(), Self::Error> {
        self.ops.push(Op::Command(command));
        Ok(())
    }

    fn write_data(&mut self, address: u8, nibbles: &[u8]) -> Result<(), Self::Error> {
        self.ops.push(Op::Write(address, nibbles.to_vec()));
        for (offset, nibble) in nibbles.iter().enumerate() {
            let cell = (address as usize + offset) % MEMORY_SIZE as usize;
            self.memory[cell] = nibble & 0x0F;
        }
        Ok(())
    }

    fn idle(&mut self) -> Result<(), Self::Error> {
        self.ops.push(Op::Idle);
        Ok(())
    }
}

/// Sums requested delays instead of sleeping
#[derive(Debug, Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl MockDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
