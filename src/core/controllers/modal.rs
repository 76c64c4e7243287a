/// Dialog state of a list view.
///
/// `F` is the creation form, `E` the form attached to an edited row
/// (same type unless the view edits something other than what it creates).
#[derive(Debug, Clone, PartialEq)]
pub enum Modal<T, F, E = F> {
    Closed,
    Creating(F),
    Viewing(T),
    Editing(T, E),
    ConfirmDelete(T),
}

impl<T, F, E> Default for Modal<T, F, E> {
    fn default() -> Self {
        Modal::Closed
    }
}

impl<T, F, E> Modal<T, F, E> {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::Closed)
    }

    pub fn close(&mut self) {
        *self = Modal::Closed;
    }

    /// Row the dialog is about, if any.
    pub fn subject(&self) -> Option<&T> {
        match self {
            Modal::Viewing(t) | Modal::Editing(t, _) | Modal::ConfirmDelete(t) => Some(t),
            Modal::Closed | Modal::Creating(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Modal::Closed => "closed",
            Modal::Creating(_) => "creating",
            Modal::Viewing(_) => "viewing",
            Modal::Editing(_, _) => "editing",
            Modal::ConfirmDelete(_) => "confirm-delete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_follows_the_dialog() {
        let mut m: Modal<u32, String> = Modal::default();
        assert!(!m.is_open());
        assert_eq!(m.subject(), None);

        m = Modal::Creating("draft".to_string());
        assert!(m.is_open());
        assert_eq!(m.subject(), None);
        assert_eq!(m.kind(), "creating");

        m = Modal::Editing(7, "form".to_string());
        assert_eq!(m.subject(), Some(&7));

        m = Modal::ConfirmDelete(9);
        assert_eq!(m.kind(), "confirm-delete");
        m.close();
        assert_eq!(m, Modal::Closed);
    }
}
