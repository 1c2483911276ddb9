//! Text front-end: prints display instructions as one line each

use app_core::{Assignment, Indicator, ModeKind, Notice, PlaybackIcon, Renderer, Role, Tag, TagDirection, Transition};
use std::io::Write;
use std::path::Path;

pub struct ConsoleRenderer<W: Write + Send> {
    out: W,
}

impl ConsoleRenderer<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            tracing::warn!("Console write failed: {}", e);
        }
    }
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Current => "current",
        Role::Comparison => "comparison",
        Role::TriptychLeft => "left",
        Role::TriptychMiddle => "middle",
        Role::TriptychRight => "right",
    }
}

fn tag_badge(tag: Tag) -> &'static str {
    match tag {
        Tag::Untagged => "",
        Tag::Favorite => " [favorite]",
        Tag::Trash => " [trash]",
    }
}

fn file_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}

impl<W: Write + Send> Renderer for ConsoleRenderer<W> {
    fn layout(&mut self, mode: ModeKind) {
        let name = match mode {
            ModeKind::Normal => "normal",
            ModeKind::Compare => "compare",
            ModeKind::Triptych => "triptych",
        };
        self.line(format_args!("== {} ==", name));
    }

    fn assign(&mut self, a: Assignment) {
        let role = role_label(a.role);
        let Some(path) = a.path.as_deref() else {
            self.line(format_args!("{}: (empty)", role));
            return;
        };

        let size = match &a.image {
            Some(img) => format!("{}x{}", img.width, img.height),
            None => "unreadable".to_string(),
        };
        let fade = match a.transition {
            Transition::CrossFade(d) if !d.is_zero() => format!(" fade {:.1}s", d.as_secs_f64()),
            _ => String::new(),
        };
        let dim = if a.dimmed { " (dimmed)" } else { "" };

        self.line(format_args!(
            "{}: {} {}{}{}{}",
            role,
            file_name(path),
            size,
            tag_badge(a.tag),
            dim,
            fade
        ));
    }

    fn retag(&mut self, role: Role, tag: Tag) {
        let badge = match tag {
            Tag::Untagged => " [untagged]",
            other => tag_badge(other),
        };
        self.line(format_args!("{}:{}", role_label(role), badge));
    }

    fn divider(&mut self, position: f64) {
        self.line(format_args!("divider: {:.2}", position));
    }

    fn notice(&mut self, notice: Notice) {
        match notice {
            Notice::Text(text) => self.line(format_args!("! {}", text)),
            Notice::Icon(PlaybackIcon::Paused) => self.line(format_args!("|| paused")),
            Notice::Icon(PlaybackIcon::Playing) => self.line(format_args!("> playing")),
        }
    }

    fn clear_notice(&mut self) {}

    fn indicate(&mut self, indicator: Indicator) {
        let mark = match indicator {
            Indicator::Tagged(TagDirection::Up) => "+",
            Indicator::Tagged(TagDirection::Down) => "-",
            Indicator::Neutral => "o",
            Indicator::NavBack => "<",
            Indicator::NavForward => ">",
        };
        self.line(format_args!("{}", mark));
    }

    fn all_trashed(&mut self) {
        self.line(format_args!("All images are in trash"));
    }

    fn finished(&mut self) {
        self.line(format_args!("Done."));
    }
}
