use notesflow_core::notify::{NoticeKind, Notifier};

/// Prints store notices to stderr so stdout stays machine-readable
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, kind: NoticeKind, title: &str, message: &str) {
        eprintln!("{}", render_notice(kind, title, message));
    }
}

pub fn render_notice(kind: NoticeKind, title: &str, message: &str) -> String {
    let marker = if kind.is_destructive() { "!" } else { "*" };
    format!("{marker} {title}: {message}")
}
