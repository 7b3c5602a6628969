use crate::{
    catalog::Catalog,
    modal::ModalState,
    telemetry::{log_event, LogLevel},
    theme::Theme,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Hero,
    About,
    Portfolio,
    Contact,
}

impl Section {
    pub const ALL: [Section; 4] = [Self::Hero, Self::About, Self::Portfolio, Self::Contact];

    pub fn anchor(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::About => "about",
            Self::Portfolio => "portfolio",
            Self::Contact => "contact",
        }
    }

    pub fn nav_label(self) -> &'static str {
        match self {
            Self::Hero => "HOME",
            Self::About => "ABOUT",
            Self::Portfolio => "PORTFOLIO",
            Self::Contact => "CONTACT",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContactView {
    #[default]
    Info,
    Form,
}

#[derive(Clone, Copy, Debug)]
pub enum SiteAction {
    ToggleTheme,
    SelectProject(u32),
    CloseModal,
    ModalExitFinished,
    ShowContactForm,
    ShowContactInfo,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SiteState {
    pub theme: Theme,
    pub modal: ModalState,
    pub contact_view: ContactView,
    catalog: &'static Catalog,
}

impl SiteState {
    pub fn new(catalog: &'static Catalog, theme: Theme) -> Self {
        Self {
            theme,
            modal: ModalState::default(),
            contact_view: ContactView::default(),
            catalog,
        }
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        log_event(
            LogLevel::Info,
            "theme_toggled",
            serde_json::json!({ "theme": self.theme.as_str() }),
        );
    }

    pub fn select_project(&mut self, id: u32) {
        match self.modal.open(self.catalog.find(id)) {
            Ok(()) => log_event(
                LogLevel::Info,
                "modal_opened",
                serde_json::json!({ "project_id": id }),
            ),
            Err(error) => log_event(
                LogLevel::Debug,
                "modal_opened",
                serde_json::json!({ "project_id": id, "error": error.to_string() }),
            ),
        }
    }

    pub fn close_modal(&mut self) {
        if self.modal.is_open() {
            self.modal.close();
            log_event(
                LogLevel::Info,
                "modal_closed",
                serde_json::json!({ "project_id": self.modal.selected().map(|p| p.id) }),
            );
        }
    }

    pub fn finish_modal_exit(&mut self) {
        self.modal.finish_exit();
    }

    pub fn show_contact_form(&mut self) {
        self.contact_view = ContactView::Form;
    }

    pub fn show_contact_info(&mut self) {
        self.contact_view = ContactView::Info;
    }

    pub fn apply(mut self, action: SiteAction) -> Self {
        match action {
            SiteAction::ToggleTheme => self.toggle_theme(),
            SiteAction::SelectProject(id) => self.select_project(id),
            SiteAction::CloseModal => self.close_modal(),
            SiteAction::ModalExitFinished => self.finish_modal_exit(),
            SiteAction::ShowContactForm => self.show_contact_form(),
            SiteAction::ShowContactInfo => self.show_contact_info(),
        }
        self
    }
}
