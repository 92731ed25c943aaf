//! Terminal-backed surface used by the demo binary.
//!
//! Each toast is drawn as a small box on stdout when attached and a closing
//! line when detached. Animation frames are only traced.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::Local;
use crossterm::style::Stylize;
use unicode_width::UnicodeWidthStr;

use crate::error::SurfaceError;
use crate::toast::{Frame, Overlay, Surface, ToastId};

/// A screen of the demo app, printing its overlays to the terminal
pub struct TerminalSurface {
    name: String,
    attached: Mutex<HashMap<ToastId, String>>,
}

impl TerminalSurface {
    /// Create a surface labelled `name` in the output
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attached: Mutex::new(HashMap::new()),
        }
    }

    fn timestamp() -> String {
        Local::now().format("%H:%M:%S%.3f").to_string()
    }
}

/// Draw `text` inside a rounded box
fn boxed(text: &str) -> String {
    let bar = "─".repeat(text.width() + 2);
    format!("╭{bar}╮\n│ {text} │\n╰{bar}╯")
}

impl Surface for TerminalSurface {
    fn attach(&self, overlay: &Overlay) -> Result<(), SurfaceError> {
        let mut attached = self.attached.lock().unwrap_or_else(PoisonError::into_inner);
        if attached.contains_key(&overlay.id) {
            return Err(SurfaceError::Rejected(format!(
                "toast {} is already on {}",
                overlay.id, self.name
            )));
        }
        attached.insert(overlay.id, overlay.text.clone());

        println!(
            "{} {} {} {} ({}, {:+}/{:+})",
            Self::timestamp().dark_grey(),
            format!("[{}]", self.name).cyan(),
            "show".green().bold(),
            overlay.id.to_string().dark_grey(),
            overlay.gravity.name(),
            overlay.x_offset,
            overlay.y_offset,
        );
        println!("{}", boxed(&overlay.text));
        Ok(())
    }

    fn apply_frame(&self, id: ToastId, frame: Frame) -> Result<(), SurfaceError> {
        tracing::trace!(
            "{} frame for {id}: alpha={:.2} dy={:.1}",
            self.name,
            frame.alpha,
            frame.translate_y
        );
        Ok(())
    }

    fn detach(&self, id: ToastId) -> Result<(), SurfaceError> {
        let text = self
            .attached
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .ok_or(SurfaceError::Gone)?;

        println!(
            "{} {} {} {} {}",
            Self::timestamp().dark_grey(),
            format!("[{}]", self.name).cyan(),
            "hide".yellow().bold(),
            id.to_string().dark_grey(),
            text.italic(),
        );
        Ok(())
    }
}
