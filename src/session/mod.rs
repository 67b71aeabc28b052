//! Upload session state machine.
//!
//! One session tracks one file from selection through conversion. The states
//! form a straight line with two terminal branches:
//!
//! ```text
//! Idle -> Uploading -> Processing -> Done
//!                                 -> Failed
//! Done | Failed -> Idle   (explicit reset only)
//! ```
//!
//! Each variant carries only the data valid for that state, so "a result
//! while failed" or "an error message while done" cannot be represented.
//! Inputs that are not legal in the current state are ignored; every
//! transition method reports whether it applied.

/// How a finished conversion is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Preview,
    Raw,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Preview => Self::Raw,
            Self::Raw => Self::Preview,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSession {
    Idle,
    /// File accepted, request being prepared.
    Uploading { filename: String },
    /// Request dispatched, response pending. Distinguished from `Uploading`
    /// for user feedback only; both cover the same outstanding request.
    Processing { filename: String },
    Done {
        filename: String,
        markdown: String,
        view_mode: ViewMode,
    },
    Failed { message: String },
}

impl Default for UploadSession {
    fn default() -> Self {
        Self::Idle
    }
}

impl UploadSession {
    pub fn new() -> Self {
        Self::Idle
    }

    /// Whether a new file would currently be accepted. Only `Idle` takes
    /// files; the drop target is disabled everywhere else.
    pub fn accepts_files(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// `Idle -> Uploading`, recording the filename.
    pub fn accept_file(&mut self, filename: impl Into<String>) -> bool {
        match self {
            Self::Idle => {
                *self = Self::Uploading {
                    filename: filename.into(),
                };
                true
            }
            _ => false,
        }
    }

    /// `Uploading -> Processing`, once the request is on the wire.
    pub fn dispatched(&mut self) -> bool {
        match self {
            Self::Uploading { filename } => {
                *self = Self::Processing {
                    filename: std::mem::take(filename),
                };
                true
            }
            _ => false,
        }
    }

    /// `Processing -> Done`. The view always opens in preview mode.
    pub fn complete(&mut self, markdown: impl Into<String>) -> bool {
        match self {
            Self::Processing { filename } => {
                *self = Self::Done {
                    filename: std::mem::take(filename),
                    markdown: markdown.into(),
                    view_mode: ViewMode::Preview,
                };
                true
            }
            _ => false,
        }
    }

    /// `Processing -> Failed`, storing the message verbatim.
    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        match self {
            Self::Processing { .. } => {
                *self = Self::Failed {
                    message: message.into(),
                };
                true
            }
            _ => false,
        }
    }

    /// `Done | Failed -> Idle`, discarding everything the session held.
    pub fn reset(&mut self) -> bool {
        match self {
            Self::Done { .. } | Self::Failed { .. } => {
                *self = Self::Idle;
                true
            }
            _ => false,
        }
    }

    /// Flip preview/raw. Only meaningful (and only applied) in `Done`.
    pub fn toggle_view(&mut self) -> bool {
        match self {
            Self::Done { view_mode, .. } => {
                *view_mode = view_mode.toggled();
                true
            }
            _ => false,
        }
    }

    pub fn status_label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Uploading { .. } => "uploading",
            Self::Processing { .. } => "processing",
            Self::Done { .. } => "done",
            Self::Failed { .. } => "error",
        }
    }

    /// The filename in play, empty when no file is held.
    pub fn filename(&self) -> &str {
        match self {
            Self::Uploading { filename }
            | Self::Processing { filename }
            | Self::Done { filename, .. } => filename,
            Self::Idle | Self::Failed { .. } => "",
        }
    }

    pub fn markdown(&self) -> Option<&str> {
        match self {
            Self::Done { markdown, .. } => Some(markdown),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn view_mode(&self) -> Option<ViewMode> {
        match self {
            Self::Done { view_mode, .. } => Some(*view_mode),
            _ => None,
        }
    }
}
