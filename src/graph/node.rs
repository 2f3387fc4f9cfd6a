/// Core trait for the mono effect blocks in the signal chain.
///
/// A node turns one input sample into one output sample. Block rendering is
/// provided on top of that for callers that work on whole buffers; nodes only
/// override it when they can do better than a per-sample loop.
pub trait GraphNode: Send {
    fn process(&mut self, input: f32) -> f32;

    /// Process `buffer` in place.
    fn render_block(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}
