// SPDX-License-Identifier: MPL-2.0
//! Orchestrator state: the original image, its compressed counterpart and the
//! busy flag.
//!
//! Every mutation of the two records goes through [`Session`]. Each change of
//! the original bumps a generation counter; compression completions carry the
//! generation they were started with and are dropped when it no longer
//! matches.

use crate::error::Error;
use crate::media::{
    CompressOptions, CompressedImage, CompressedOutput, CompressionOutcome, ImageRecord,
    PreviewRegistry, SourceImage,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BusyState {
    #[default]
    Idle,
    Compressing,
}

/// A compression request ready to be handed to the compressor.
#[derive(Debug, Clone)]
pub struct CompressionJob {
    pub generation: u64,
    pub input: SourceImage,
    pub options: CompressOptions,
}

/// What happened to a compression completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Compressed,
    FellBack,
    /// The original changed while compressing; the result was dropped.
    Stale,
}

#[derive(Debug, Default)]
pub struct Session {
    original: Option<ImageRecord>,
    compressed: Option<CompressedImage>,
    busy: BusyState,
    generation: u64,
}

impl Session {
    pub fn original(&self) -> Option<&ImageRecord> {
        self.original.as_ref()
    }

    pub fn compressed(&self) -> Option<&CompressedImage> {
        self.compressed.as_ref()
    }

    pub fn busy(&self) -> BusyState {
        self.busy
    }

    pub fn is_busy(&self) -> bool {
        self.busy == BusyState::Compressing
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Compression and the option inputs are unavailable without an original
    /// or while a run is in flight.
    pub fn is_disabled(&self) -> bool {
        self.original.is_none() || self.is_busy()
    }

    /// Releases the compressed preview unless it is borrowed from the original.
    fn drop_compressed(&mut self, registry: &mut PreviewRegistry) {
        let Some(compressed) = self.compressed.take() else {
            return;
        };
        let shared = self
            .original
            .as_ref()
            .is_some_and(|original| original.preview.same_preview(&compressed.record.preview));
        if !shared && !compressed.is_fallback() {
            registry.release(&compressed.record.preview);
        }
    }

    /// Installs a new original, discarding any compressed result.
    ///
    /// Returns to idle even while a job is running: bumping the generation
    /// turns that job's completion stale, so it can never land on the new
    /// original. The original's preview belongs to the intake panel, which
    /// releases it.
    pub fn replace_original(&mut self, record: ImageRecord, registry: &mut PreviewRegistry) {
        self.drop_compressed(registry);
        self.original = Some(record);
        self.busy = BusyState::Idle;
        self.generation += 1;
    }

    /// Forgets both records and returns to idle.
    pub fn clear(&mut self, registry: &mut PreviewRegistry) {
        self.drop_compressed(registry);
        self.original = None;
        self.busy = BusyState::Idle;
        self.generation += 1;
    }

    /// Enters the busy state and returns the job to run, or `None` when
    /// compression is currently unavailable.
    pub fn begin_compression(&mut self, options: CompressOptions) -> Option<CompressionJob> {
        if self.is_disabled() {
            return None;
        }
        let original = self.original.as_ref()?;
        self.busy = BusyState::Compressing;
        Some(CompressionJob {
            generation: self.generation,
            input: original.source(),
            options,
        })
    }

    /// Applies the outcome of the job started at `generation`.
    ///
    /// A failure stands the original in for the compressed image.
    pub fn complete_compression(
        &mut self,
        generation: u64,
        result: Result<CompressedOutput, Error>,
        registry: &mut PreviewRegistry,
    ) -> Completion {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "dropping stale compression");
            return Completion::Stale;
        }
        let Some(original) = self.original.clone() else {
            return Completion::Stale;
        };

        self.drop_compressed(registry);
        self.busy = BusyState::Idle;

        match result {
            Ok(output) => {
                let record = ImageRecord::from_output(&original, output, registry);
                tracing::info!(
                    name = %record.name,
                    original_size = original.size,
                    compressed_size = record.size,
                    "compression finished"
                );
                self.compressed = Some(CompressedImage {
                    record,
                    outcome: CompressionOutcome::Compressed,
                });
                Completion::Compressed
            }
            Err(error) => {
                tracing::error!(%error, name = %original.name, "compression failed, keeping original");
                self.compressed = Some(CompressedImage {
                    record: original,
                    outcome: CompressionOutcome::FallbackToOriginal {
                        reason: error.to_string(),
                    },
                });
                Completion::FellBack
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{CompressionSettings, DimensionToggles};
    use std::sync::Arc;

    fn original(registry: &mut PreviewRegistry) -> ImageRecord {
        ImageRecord::new("photo.png", "image/png", Arc::from(&[7u8; 100][..]), registry)
    }

    fn options() -> CompressOptions {
        CompressOptions::from_settings(&CompressionSettings::default(), DimensionToggles::default())
    }

    fn output(size: usize) -> CompressedOutput {
        CompressedOutput {
            bytes: vec![1u8; size].into(),
            mime_type: "image/jpeg".to_string(),
            width: 10,
            height: 10,
        }
    }

    #[test]
    fn starts_idle_and_disabled() {
        let session = Session::default();
        assert_eq!(session.busy(), BusyState::Idle);
        assert!(session.is_disabled());
        assert!(session.original().is_none());
    }

    #[test]
    fn begin_without_original_is_a_no_op() {
        let mut session = Session::default();
        assert!(session.begin_compression(options()).is_none());
        assert_eq!(session.busy(), BusyState::Idle);
    }

    #[test]
    fn begin_enters_busy_and_blocks_reentry() {
        let mut registry = PreviewRegistry::new();
        let mut session = Session::default();
        session.replace_original(original(&mut registry), &mut registry);

        let job = session.begin_compression(options()).expect("job");
        assert_eq!(job.input.bytes.len(), 100);
        assert!(session.is_busy());
        assert!(session.is_disabled());
        assert!(session.begin_compression(options()).is_none());
    }

    #[test]
    fn success_creates_prefixed_record() {
        let mut registry = PreviewRegistry::new();
        let mut session = Session::default();
        session.replace_original(original(&mut registry), &mut registry);
        let job = session.begin_compression(options()).expect("job");

        let completion = session.complete_compression(job.generation, Ok(output(40)), &mut registry);
        assert_eq!(completion, Completion::Compressed);

        let compressed = session.compressed().expect("compressed");
        assert_eq!(compressed.record.name, "compressed_photo.png");
        assert_eq!(compressed.record.size, 40);
        assert_eq!(compressed.outcome, CompressionOutcome::Compressed);
        assert!(!session.is_busy());
    }

    #[test]
    fn failure_falls_back_to_original() {
        let mut registry = PreviewRegistry::new();
        let mut session = Session::default();
        session.replace_original(original(&mut registry), &mut registry);
        let job = session.begin_compression(options()).expect("job");

        let completion = session.complete_compression(
            job.generation,
            Err(Error::Encode("boom".into())),
            &mut registry,
        );
        assert_eq!(completion, Completion::FellBack);

        let compressed = session.compressed().expect("fallback");
        let original = session.original().expect("original");
        assert!(compressed.is_fallback());
        assert_eq!(compressed.record.name, original.name);
        assert_eq!(compressed.record.size, original.size);
        assert!(compressed.record.preview.same_preview(&original.preview));
        assert!(!session.is_busy());
    }

    #[test]
    fn fallback_never_releases_the_original_preview() {
        let mut registry = PreviewRegistry::new();
        let mut session = Session::default();
        let record = original(&mut registry);
        let preview = record.preview.clone();
        session.replace_original(record, &mut registry);

        let job = session.begin_compression(options()).expect("job");
        session.complete_compression(job.generation, Err(Error::Decode("bad".into())), &mut registry);
        let job = session.begin_compression(options()).expect("job");
        session.complete_compression(job.generation, Ok(output(10)), &mut registry);

        assert!(registry.is_live(&preview));
    }

    #[test]
    fn recompression_releases_superseded_preview() {
        let mut registry = PreviewRegistry::new();
        let mut session = Session::default();
        session.replace_original(original(&mut registry), &mut registry);

        let job = session.begin_compression(options()).expect("job");
        session.complete_compression(job.generation, Ok(output(40)), &mut registry);
        let first = session.compressed().expect("first").record.preview.clone();

        let job = session.begin_compression(options()).expect("job");
        session.complete_compression(job.generation, Ok(output(30)), &mut registry);

        assert!(!registry.is_live(&first));
        // original + latest compressed
        assert_eq!(registry.live_count(), 2);
    }

    #[test]
    fn clear_resets_everything() {
        let mut registry = PreviewRegistry::new();
        let mut session = Session::default();
        session.replace_original(original(&mut registry), &mut registry);
        let job = session.begin_compression(options()).expect("job");
        session.complete_compression(job.generation, Ok(output(40)), &mut registry);

        session.clear(&mut registry);
        assert!(session.original().is_none());
        assert!(session.compressed().is_none());
        assert!(!session.is_busy());
        // only the intake-owned original preview is left
        assert_eq!(registry.live_count(), 1);
    }

    #[test]
    fn clear_while_busy_returns_to_idle_and_drops_late_result() {
        let mut registry = PreviewRegistry::new();
        let mut session = Session::default();
        session.replace_original(original(&mut registry), &mut registry);
        let job = session.begin_compression(options()).expect("job");

        session.clear(&mut registry);
        assert!(!session.is_busy());

        let completion = session.complete_compression(job.generation, Ok(output(40)), &mut registry);
        assert_eq!(completion, Completion::Stale);
        assert!(session.compressed().is_none());
        assert_eq!(registry.live_count(), 1);
    }

    #[test]
    fn replacing_original_discards_compressed() {
        let mut registry = PreviewRegistry::new();
        let mut session = Session::default();
        session.replace_original(original(&mut registry), &mut registry);
        let job = session.begin_compression(options()).expect("job");
        session.complete_compression(job.generation, Ok(output(40)), &mut registry);

        let replacement = ImageRecord::new("other.jpg", "image/jpeg", Arc::from(&[1u8; 5][..]), &mut registry);
        session.replace_original(replacement, &mut registry);

        assert!(session.compressed().is_none());
        assert_eq!(session.original().map(|r| r.name.as_str()), Some("other.jpg"));
    }

    #[test]
    fn result_for_previous_original_is_stale() {
        let mut registry = PreviewRegistry::new();
        let mut session = Session::default();
        session.replace_original(original(&mut registry), &mut registry);
        let job = session.begin_compression(options()).expect("job");

        let replacement = ImageRecord::new("other.jpg", "image/jpeg", Arc::from(&[1u8; 5][..]), &mut registry);
        session.replace_original(replacement, &mut registry);
        assert!(!session.is_busy());

        let completion = session.complete_compression(job.generation, Ok(output(3)), &mut registry);
        assert_eq!(completion, Completion::Stale);
        assert!(session.compressed().is_none());
    }
}
