use crate::logcat::color::Color;
use crate::logcat::style::Styler;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

// StrictMode policy violation; ~duration=319 ms: android.os.StrictMode$StrictModeDiskWriteViolation: policy=31 violation=1
static STRICT_MODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(StrictMode policy violation)(; ~duration=)(\d+ ms)")
        .expect("valid strict mode regex")
});

// GC_CONCURRENT freed 3617K, 29% free 20525K/28648K, paused 4ms+5ms, total 85ms
static GC_SUMMARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(GC_(?:CONCURRENT|FOR_M?ALLOC|EXTERNAL_ALLOC|EXPLICIT) )(freed <?\d+.)(, \d+% free \d+./\d+., )(paused \d+ms(?:\+\d+ms)?)",
    )
    .expect("valid gc summary regex")
});

type Transform = fn(&Captures<'_>, &Styler) -> String;

/// A cosmetic rewrite of message text.
pub struct MessageRule {
    pub name: &'static str,
    pattern: &'static Regex,
    transform: Transform,
}

impl MessageRule {
    pub fn is_match(&self, message: &str) -> bool {
        self.pattern.is_match(message)
    }
}

/// Ordered message rules. Rules only ever look at the plain message: the first
/// rule that matches rewrites it and the rest are skipped, so no rule can
/// match escape sequences inserted by another.
pub struct MessageRules {
    rules: Vec<MessageRule>,
}

impl MessageRules {
    pub fn new(color_gc: bool) -> Self {
        let mut rules = vec![MessageRule {
            name: "strict_mode",
            pattern: &STRICT_MODE,
            transform: strict_mode,
        }];

        if color_gc {
            rules.push(MessageRule {
                name: "gc_summary",
                pattern: &GC_SUMMARY,
                transform: gc_summary,
            });
        }

        Self { rules }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }

    pub fn apply<'a>(&self, message: &'a str, styler: &Styler) -> Cow<'a, str> {
        if !styler.enabled() {
            return Cow::Borrowed(message);
        }

        for rule in &self.rules {
            let Some(caps) = rule.pattern.captures(message) else {
                continue;
            };
            let Some(whole) = caps.get(0) else {
                continue;
            };

            let mut out = String::with_capacity(message.len() + 32);
            out.push_str(&message[..whole.start()]);
            out.push_str(&(rule.transform)(&caps, styler));
            out.push_str(&message[whole.end()..]);
            return Cow::Owned(out);
        }

        Cow::Borrowed(message)
    }
}

fn strict_mode(caps: &Captures<'_>, styler: &Styler) -> String {
    format!(
        "{}{}{}",
        styler.fg(&caps[1], Color::Red),
        &caps[2],
        styler.fg(&caps[3], Color::Yellow)
    )
}

fn gc_summary(caps: &Captures<'_>, styler: &Styler) -> String {
    format!(
        "{}{}{}{}",
        &caps[1],
        styler.fg(&caps[2], Color::Green),
        &caps[3],
        styler.fg(&caps[4], Color::Yellow)
    )
}
