pub(crate) mod empty_state;
pub(crate) mod fields;
pub(crate) mod modal;
pub(crate) mod remove;
pub(crate) mod shell;
pub(crate) mod toast;
