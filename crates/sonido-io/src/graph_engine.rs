//! Graph-based audio processing engine.
//!
//! [`GraphEngine`] wraps [`ProcessingGraph`] to provide a higher-level API for
//! audio processing with DAG-based routing. It mirrors [`ProcessingEngine`]'s
//! interface for backward compatibility while enabling parallel paths, sidechains,
//! and multiband processing.
//!
//! # Migration from `ProcessingEngine`
//!
//! Use [`from_chain()`](GraphEngine::from_chain) for drop-in replacement of linear
//! chains. The output is numerically identical to `ProcessingEngine` for linear
//! topologies.
//!
//! ```rust,ignore
//! use sonido_io::GraphEngine;
//!
//! let mut engine = GraphEngine::from_chain(
//!     vec![Box::new(Distortion::new(48000.0)), Box::new(Reverb::new(48000.0))],
//!     48000.0,
//!     256,
//! )?;
//!
//! engine.process_block_stereo(&left_in, &right_in, &mut left_out, &mut right_out);
//! ```

use crate::StereoSamples;
use sonido_core::Effect;
use sonido_core::graph::{EdgeId, GraphError, NodeId, ProcessingGraph};

/// Graph-based processing engine for DAG audio routing.
///
/// Wraps [`ProcessingGraph`] with a convenient API for common operations.
/// Supports both linear chains (backward compatible) and arbitrary DAG topologies.
pub struct GraphEngine {
    graph: ProcessingGraph,
    output_node: NodeId,
    tail: NodeId,
    tail_to_output: EdgeId,
    effect_count: usize,
}

impl GraphEngine {
    /// Creates an empty linear chain: Input → Output.
    ///
    /// Effects can be appended with [`add_effect`](Self::add_effect), which
    /// splices each one in before the output node and recompiles.
    pub fn new_linear(sample_rate: f32, block_size: usize) -> Self {
        let mut graph = ProcessingGraph::new(sample_rate, block_size);
        let input_node = graph.add_input();
        let output_node = graph.add_output();
        let tail_to_output = graph
            .connect(input_node, output_node)
            .expect("input and output nodes were just created");
        graph.compile().expect("empty linear graph always compiles");

        Self {
            graph,
            output_node,
            tail: input_node,
            tail_to_output,
            effect_count: 0,
        }
    }

    /// Creates a linear effect chain: Input → E1 → E2 → ... → En → Output.
    ///
    /// This is a drop-in replacement for `ProcessingEngine` with identical output.
    pub fn from_chain(
        effects: Vec<Box<dyn Effect + Send>>,
        sample_rate: f32,
        block_size: usize,
    ) -> Result<Self, GraphError> {
        let mut engine = Self::new_linear(sample_rate, block_size);
        for effect in effects {
            engine.add_effect(effect);
        }
        Ok(engine)
    }

    /// Appends an effect to the end of the chain, splicing it in before the
    /// output node and recompiling. Intended for setup time, not the audio
    /// callback — each call triggers a graph recompile.
    pub fn add_effect(&mut self, effect: Box<dyn Effect + Send>) {
        self.graph
            .disconnect(self.tail_to_output)
            .expect("tail_to_output always names a live edge");

        let node = self.graph.add_effect(effect);
        self.graph
            .connect(self.tail, node)
            .expect("tail node always exists");
        self.tail_to_output = self
            .graph
            .connect(node, self.output_node)
            .expect("output node always exists");

        self.tail = node;
        self.effect_count += 1;
        self.graph.compile().expect("linear graph always compiles");
    }

    /// Number of effects currently in the chain.
    pub fn effect_count(&self) -> usize {
        self.effect_count
    }

    /// True if the chain has no effects (pure Input → Output passthrough).
    pub fn is_empty(&self) -> bool {
        self.effect_count == 0
    }

    /// Returns a mutable reference to the underlying [`ProcessingGraph`].
    ///
    /// Use this for direct graph mutations (add/remove/connect nodes, recompile).
    pub fn graph_mut(&mut self) -> &mut ProcessingGraph {
        &mut self.graph
    }

    /// Returns a reference to the underlying [`ProcessingGraph`].
    pub fn graph(&self) -> &ProcessingGraph {
        &self.graph
    }

    /// Returns the sample rate.
    pub fn sample_rate(&self) -> f32 {
        self.graph.sample_rate()
    }

    /// Sets the sample rate for all effect nodes. Requires recompilation.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.graph.set_sample_rate(sample_rate);
    }

    /// Resets all effect nodes and clears delay lines.
    pub fn reset(&mut self) {
        self.graph.reset();
    }

    /// Returns the total graph latency in samples.
    pub fn latency_samples(&self) -> usize {
        self.graph.latency_samples()
    }

    /// Processes a block of mono audio through the graph.
    ///
    /// Convenience wrapper: feeds `input` to both graph channels and averages
    /// the stereo result back down to mono. Identical to the stereo path for
    /// any chain built from mono-only effects. Output buffer must be at least
    /// as large as input.
    pub fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        let len = input.len();
        let mut left_out = vec![0.0; len];
        let mut right_out = vec![0.0; len];
        self.graph
            .process_block(input, input, &mut left_out, &mut right_out);
        for i in 0..len {
            output[i] = 0.5 * (left_out[i] + right_out[i]);
        }
    }

    /// Processes a block of mono audio in place.
    pub fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        let len = buffer.len();
        let mut left_out = vec![0.0; len];
        let mut right_out = vec![0.0; len];
        {
            let input: &[f32] = buffer;
            self.graph
                .process_block(input, input, &mut left_out, &mut right_out);
        }
        for i in 0..len {
            buffer[i] = 0.5 * (left_out[i] + right_out[i]);
        }
    }

    /// Processes an entire mono file through the graph.
    ///
    /// Splits the input into blocks of `block_size` and processes each.
    pub fn process_file(&mut self, input: &[f32], block_size: usize) -> Vec<f32> {
        let mut output = vec![0.0; input.len()];
        for (in_chunk, out_chunk) in input.chunks(block_size).zip(output.chunks_mut(block_size)) {
            let len = in_chunk.len();
            self.process_block(in_chunk, &mut out_chunk[..len]);
        }
        output
    }

    /// Processes a block of stereo audio through the graph.
    ///
    /// Output buffers must be at least as large as input buffers.
    pub fn process_block_stereo(
        &mut self,
        left_in: &[f32],
        right_in: &[f32],
        left_out: &mut [f32],
        right_out: &mut [f32],
    ) {
        self.graph
            .process_block(left_in, right_in, left_out, right_out);
    }

    /// Processes an entire stereo file through the graph.
    ///
    /// Splits the input into blocks of the graph's block size and processes each.
    pub fn process_file_stereo(
        &mut self,
        input: &StereoSamples,
        block_size: usize,
    ) -> StereoSamples {
        let len = input.len();
        let mut left_out = vec![0.0; len];
        let mut right_out = vec![0.0; len];

        for i in (0..len).step_by(block_size) {
            let chunk_len = block_size.min(len - i);
            let end = i + chunk_len;

            self.graph.process_block(
                &input.left[i..end],
                &input.right[i..end],
                &mut left_out[i..end],
                &mut right_out[i..end],
            );
        }

        StereoSamples::new(left_out, right_out)
    }
}
