//! Text summary viewer for the terminal.

use std::io::Write;

use airframe::{Model, Viewer};

/// Prints a model summary, or the error in its place.
pub struct TerminalViewer<W: Write> {
    out: W,
}

impl<W: Write> TerminalViewer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_model(&mut self, model: &Model) -> std::io::Result<()> {
        let mesh = model.solid.to_mesh();
        writeln!(self.out, "Aircraft model")?;
        writeln!(self.out, "  markers:   {}", model.markers)?;
        writeln!(self.out, "  hulls:     {}", model.hulls)?;
        writeln!(self.out, "  triangles: {}", mesh.num_triangles())?;
        match model.solid.bounding_box() {
            Some(b) => {
                let size = b.size();
                writeln!(
                    self.out,
                    "  bounds:    ({:.3}, {:.3}, {:.3}) .. ({:.3}, {:.3}, {:.3})",
                    b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z
                )?;
                writeln!(
                    self.out,
                    "  size:      {:.3} x {:.3} x {:.3}",
                    size.x, size.y, size.z
                )?;
            }
            None => writeln!(self.out, "  (empty)")?,
        }
        for skipped in &model.skipped {
            writeln!(self.out, "  skipped:   {skipped}")?;
        }
        Ok(())
    }
}

impl<W: Write> Viewer for TerminalViewer<W> {
    fn show(&mut self, model: &Model) {
        if let Err(e) = self.write_model(model) {
            tracing::error!("failed to write model summary: {e}");
        }
    }

    fn show_error(&mut self, message: &str) {
        if let Err(e) = writeln!(self.out, "{message}") {
            tracing::error!("failed to write error message: {e}");
        }
    }
}
