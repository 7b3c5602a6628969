use thiserror::Error;

use crate::catalog::Project;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModalPhase {
    #[default]
    Closed,
    Open,
    Closing,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModalError {
    #[error("cannot open the project modal without a project")]
    MissingProject,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ModalState {
    phase: ModalPhase,
    selected: Option<&'static Project>,
}

impl ModalState {
    pub fn open(&mut self, project: Option<&'static Project>) -> Result<(), ModalError> {
        let project = project.ok_or(ModalError::MissingProject)?;
        self.show(project);
        Ok(())
    }

    fn show(&mut self, project: &'static Project) {
        self.selected = Some(project);
        self.phase = ModalPhase::Open;
    }

    /// The project stays selected until `finish_exit`, so the closing frame
    /// still renders it.
    pub fn close(&mut self) {
        if self.phase == ModalPhase::Open {
            self.phase = ModalPhase::Closing;
        }
    }

    pub fn finish_exit(&mut self) {
        if self.phase == ModalPhase::Closing {
            self.phase = ModalPhase::Closed;
            self.selected = None;
        }
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == ModalPhase::Open
    }

    pub fn is_rendered(&self) -> bool {
        self.phase != ModalPhase::Closed && self.selected.is_some()
    }

    pub fn selected(&self) -> Option<&'static Project> {
        self.selected
    }
}
