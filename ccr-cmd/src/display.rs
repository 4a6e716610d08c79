//! Output surfaces that are replaced, not overwritten, between runs.
//!
//! A [`DisplaySession`] holds at most one live [`Surface`]. Showing a new
//! surface tears the previous one down first, so a failure while presenting
//! the new one never leaves the old one standing in for it.

use log::debug;

/// Something rendered for the user that must be cleaned up before it is
/// replaced.
pub trait Surface {
    fn present(&mut self) -> anyhow::Result<()>;
    fn teardown(&mut self) -> anyhow::Result<()>;
}

pub struct DisplaySession<S: Surface> {
    active: Option<S>,
}

impl<S: Surface> DisplaySession<S> {
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Release the current surface, then present and keep `surface`.
    pub fn show(&mut self, mut surface: S) -> anyhow::Result<()> {
        self.release()?;
        surface.present()?;
        self.active = Some(surface);
        Ok(())
    }

    /// Tear down the current surface, if any.
    pub fn release(&mut self) -> anyhow::Result<()> {
        if let Some(mut surface) = self.active.take() {
            debug!("Releasing previous surface");
            surface.teardown()?;
        }
        Ok(())
    }

    pub fn active(&self) -> Option<&S> {
        self.active.as_ref()
    }
}

impl<S: Surface> Default for DisplaySession<S> {
    fn default() -> Self {
        Self::new()
    }
}
