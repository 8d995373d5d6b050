//! Diagnostic events emitted while normalising a stream.
//!
//! The evaluator never logs on its own; it reports to a [`Sink`] passed in by
//! the caller. [`TraceSink`] forwards everything to `tracing`; tests collect
//! events in a `Vec<Event>`.

use moebius_types::{Digit, SignRegion};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The stream was placed in a sign region.
    Sign(SignRegion),
    /// A digit was emitted at the given lookahead depth (0 = top level).
    Digit { digit: Digit, depth: u32 },
    /// One absorption step on a head of the given arity.
    Absorb {
        arity: usize,
        counter: Option<u64>,
        depth: u32,
    },
    /// A nested one-digit emission started on a tensor argument.
    Lookahead { depth: u32 },
}

pub trait Sink {
    fn record(&mut self, event: &Event);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl Sink for NullSink {
    fn record(&mut self, _event: &Event) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TraceSink;

impl Sink for TraceSink {
    fn record(&mut self, event: &Event) {
        match *event {
            Event::Sign(region) => tracing::debug!(sign = %region, "Emitted sign"),
            Event::Digit { digit, depth } => {
                tracing::debug!(digit = %digit, depth, "Emitted digit");
            }
            Event::Absorb {
                arity,
                counter,
                depth,
            } => tracing::trace!(arity, counter, depth, "Absorbing argument"),
            Event::Lookahead { depth } => tracing::trace!(depth, "Starting lookahead"),
        }
    }
}

impl Sink for Vec<Event> {
    fn record(&mut self, event: &Event) {
        self.push(*event);
    }
}
