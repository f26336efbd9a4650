use std::time::{Duration, Instant};

use tracing::info;

use crate::content::{Language, WordId};

use super::focus::FocusEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewEndReason {
    /// Another word took focus.
    Switch,
    /// Focus was released without a successor, usually by zooming out.
    Released,
    Unload,
}

impl ViewEndReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Switch => "switch",
            Self::Released => "released",
            Self::Unload => "unload",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewRecord {
    pub word_id: WordId,
    pub duration: Duration,
    pub reason: ViewEndReason,
}

#[derive(Clone, Copy, Debug)]
struct ActiveView {
    word_id: WordId,
    started: Instant,
    language: Language,
}

/// Turns focus enter/exit pairs into `word_view_start` and `word_view_end`
/// log events.
#[derive(Debug, Default)]
pub struct ViewDurationTracker {
    current: Option<ActiveView>,
}

impl ViewDurationTracker {
    pub fn current(&self) -> Option<WordId> {
        self.current.map(|view| view.word_id)
    }

    /// Consumes one frame's focus events. An exit directly followed by an
    /// enter is a switch.
    pub fn consume(
        &mut self,
        events: &[FocusEvent],
        language: Language,
        now: Instant,
    ) -> Vec<ViewRecord> {
        let mut finished = Vec::new();
        for (index, event) in events.iter().enumerate() {
            match *event {
                FocusEvent::Entered(word_id) => {
                    // Unpaired enter still closes the previous view.
                    if let Some(record) = self.end(ViewEndReason::Switch, now) {
                        finished.push(record);
                    }
                    self.start(word_id, language, now);
                }
                FocusEvent::Exited(word_id) => {
                    if self.current() != Some(word_id) {
                        continue;
                    }
                    let reason = match events.get(index + 1) {
                        Some(FocusEvent::Entered(_)) => ViewEndReason::Switch,
                        _ => ViewEndReason::Released,
                    };
                    if let Some(record) = self.end(reason, now) {
                        finished.push(record);
                    }
                }
            }
        }
        finished
    }

    fn start(&mut self, word_id: WordId, language: Language, now: Instant) {
        info!(
            event = "word_view_start",
            word_id,
            lang = language.code(),
            "word view started"
        );
        self.current = Some(ActiveView {
            word_id,
            started: now,
            language,
        });
    }

    pub fn end(&mut self, reason: ViewEndReason, now: Instant) -> Option<ViewRecord> {
        let view = self.current.take()?;
        let duration = now.saturating_duration_since(view.started);
        info!(
            event = "word_view_end",
            word_id = view.word_id,
            duration_ms = duration.as_millis() as u64,
            reason = reason.as_str(),
            lang = view.language.code(),
            "word view ended"
        );
        Some(ViewRecord {
            word_id: view.word_id,
            duration,
            reason,
        })
    }
}

impl Drop for ViewDurationTracker {
    fn drop(&mut self) {
        self.end(ViewEndReason::Unload, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_reports_duration_of_previous_word() {
        let mut tracker = ViewDurationTracker::default();
        let start = Instant::now();

        let records = tracker.consume(&[FocusEvent::Entered(1)], Language::Zh, start);
        assert!(records.is_empty());
        assert_eq!(tracker.current(), Some(1));

        let later = start + Duration::from_millis(1500);
        let records = tracker.consume(
            &[FocusEvent::Exited(1), FocusEvent::Entered(2)],
            Language::Zh,
            later,
        );
        assert_eq!(
            records,
            vec![ViewRecord {
                word_id: 1,
                duration: Duration::from_millis(1500),
                reason: ViewEndReason::Switch,
            }]
        );
        assert_eq!(tracker.current(), Some(2));
    }

    #[test]
    fn bare_exit_is_a_release() {
        let mut tracker = ViewDurationTracker::default();
        let start = Instant::now();
        tracker.consume(&[FocusEvent::Entered(4)], Language::En, start);

        let records = tracker.consume(&[FocusEvent::Exited(4)], Language::En, start);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].reason, ViewEndReason::Released);
        assert_eq!(tracker.current(), None);
    }

    #[test]
    fn exit_for_another_word_is_ignored() {
        let mut tracker = ViewDurationTracker::default();
        let start = Instant::now();
        tracker.consume(&[FocusEvent::Entered(4)], Language::En, start);
        assert!(
            tracker
                .consume(&[FocusEvent::Exited(9)], Language::En, start)
                .is_empty()
        );
        assert_eq!(tracker.current(), Some(4));
    }

    #[test]
    fn ending_without_a_view_is_a_no_op() {
        let mut tracker = ViewDurationTracker::default();
        assert_eq!(tracker.end(ViewEndReason::Unload, Instant::now()), None);
    }
}
