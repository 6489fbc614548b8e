//! Recording audio output for unit tests.

use alloc::rc::Rc;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::audio::{AudioError, AudioOutput, ToneVoice};
use crate::settings::Frequency;

#[derive(Debug, Clone, PartialEq)]
pub enum GraphCall {
    Resume,
    CreateVoice { frequency_hz: u32, gain: f32 },
    SetFrequency(u32),
    SetGain(f32),
    Stop,
}

#[derive(Default)]
struct Graph {
    calls: Vec<GraphCall>,
    voices_created: usize,
    fail_resume: bool,
    fail_create: bool,
    fail_live_updates: bool,
    ended: bool,
}

#[derive(Default)]
pub struct MockOutput {
    graph: Rc<RefCell<Graph>>,
}

impl MockOutput {
    pub fn failing_resume() -> Self {
        let output = Self::default();
        output.graph.borrow_mut().fail_resume = true;
        output
    }

    pub fn set_fail_resume(&mut self, fail: bool) {
        self.graph.borrow_mut().fail_resume = fail;
    }

    pub fn set_fail_create(&mut self, fail: bool) {
        self.graph.borrow_mut().fail_create = fail;
    }

    pub fn fail_live_updates(&self) {
        self.graph.borrow_mut().fail_live_updates = true;
    }

    /// Makes the current voice report that it finished by itself.
    pub fn end_playback(&self) {
        self.graph.borrow_mut().ended = true;
    }

    pub fn calls(&self) -> Vec<GraphCall> {
        self.graph.borrow().calls.clone()
    }

    pub fn voices_created(&self) -> usize {
        self.graph.borrow().voices_created
    }
}

impl AudioOutput for MockOutput {
    type Voice = MockVoice;

    fn resume(&mut self) -> Result<(), AudioError> {
        let mut graph = self.graph.borrow_mut();
        if graph.fail_resume {
            return Err(AudioError::NoDevice);
        }
        graph.calls.push(GraphCall::Resume);
        Ok(())
    }

    fn create_voice(&mut self, frequency: Frequency, gain: f32) -> Result<MockVoice, AudioError> {
        let mut graph = self.graph.borrow_mut();
        if graph.fail_create {
            return Err(AudioError::Build("oscillator unavailable".to_string()));
        }
        graph.calls.push(GraphCall::CreateVoice {
            frequency_hz: frequency.hz(),
            gain,
        });
        graph.voices_created += 1;
        graph.ended = false;
        Ok(MockVoice {
            graph: Rc::clone(&self.graph),
        })
    }
}

pub struct MockVoice {
    graph: Rc<RefCell<Graph>>,
}

impl MockVoice {
    fn record(&self, call: GraphCall) -> Result<(), AudioError> {
        let mut graph = self.graph.borrow_mut();
        if graph.fail_live_updates {
            return Err(AudioError::Closed);
        }
        graph.calls.push(call);
        Ok(())
    }
}

impl ToneVoice for MockVoice {
    fn set_frequency(&mut self, frequency: Frequency) -> Result<(), AudioError> {
        self.record(GraphCall::SetFrequency(frequency.hz()))
    }

    fn set_gain(&mut self, gain: f32) -> Result<(), AudioError> {
        self.record(GraphCall::SetGain(gain))
    }

    fn stop(self) -> Result<(), AudioError> {
        self.graph.borrow_mut().calls.push(GraphCall::Stop);
        Ok(())
    }

    fn has_ended(&self) -> bool {
        self.graph.borrow().ended
    }
}
