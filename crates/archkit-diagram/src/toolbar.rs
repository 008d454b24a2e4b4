//! Toolbar command dispatch
//!
//! The toolbar is stateless: each button press becomes a
//! [`ToolbarAction`] handed to the canvas. Import carries the JSON the
//! host already read; export hands the JSON back for the host to write.

use crate::canvas::Canvas;
use crate::templates::DiagramTemplate;
use archkit_core::Result;

/// A toolbar button press
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarAction {
    ZoomIn,
    ZoomOut,
    ResetZoom,
    FitToContent,
    /// Export the diagram; the JSON comes back in the outcome
    Export,
    /// Import the given diagram JSON
    Import(String),
    /// Replace the diagram with a starter template
    ApplyTemplate(DiagramTemplate),
    /// Replace the diagram with a blank one
    Clear,
}

/// What a dispatched action produced
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarOutcome {
    /// Action applied, nothing to hand back
    Done,
    /// Export JSON for the host to persist
    Exported(String),
}

impl Canvas {
    /// Applies one toolbar action.
    pub fn dispatch_toolbar(&mut self, action: ToolbarAction) -> Result<ToolbarOutcome> {
        match action {
            ToolbarAction::ZoomIn => {
                self.zoom_in();
                Ok(ToolbarOutcome::Done)
            }
            ToolbarAction::ZoomOut => {
                self.zoom_out();
                Ok(ToolbarOutcome::Done)
            }
            ToolbarAction::ResetZoom => {
                self.reset_zoom();
                Ok(ToolbarOutcome::Done)
            }
            ToolbarAction::FitToContent => {
                self.fit_to_content();
                Ok(ToolbarOutcome::Done)
            }
            ToolbarAction::Export => Ok(ToolbarOutcome::Exported(self.export_json()?)),
            ToolbarAction::Import(json) => {
                self.import_json(&json)?;
                Ok(ToolbarOutcome::Done)
            }
            ToolbarAction::ApplyTemplate(template) => {
                self.apply_template(template);
                Ok(ToolbarOutcome::Done)
            }
            ToolbarAction::Clear => {
                self.clear();
                Ok(ToolbarOutcome::Done)
            }
        }
    }
}
