//! Render sink that writes display models to the log

use async_trait::async_trait;
use nextup_core::RenderSink;
use nextup_domain::{DisplayModel, NextupError, Result, SurfaceTargets};
use tracing::{info, instrument};

/// Emits every pushed model as a structured `info` event.
///
/// Useful for headless runs and as a stand-in while no real surface is
/// attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingRenderSink;

#[async_trait]
impl RenderSink for TracingRenderSink {
    #[instrument(skip_all)]
    async fn render(&self, targets: &SurfaceTargets, model: &DisplayModel) -> Result<()> {
        let payload = serde_json::to_string(model)
            .map_err(|e| NextupError::Render(format!("Failed to encode model: {e}")))?;

        info!(
            targets = ?targets,
            no_events = model.no_events,
            visible_slots = model.visible_slots(),
            model = %payload,
            "display updated"
        );
        Ok(())
    }
}
