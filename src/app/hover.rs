use graph_explorer::graph::{HoverEvent, HoverInbox};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum HoverSource {
    Canvas,
    Search,
}

/// Funnels hover candidates from the canvas and the search list into one inbox.
///
/// Each source only reports changes. A source that loses its candidate clears
/// the hover only if it set the current one, so leaving the canvas for a
/// search row does not wipe the row's hover.
#[derive(Debug, Default)]
pub(super) struct HoverRouter {
    inbox: HoverInbox,
    canvas: Option<String>,
    search: Option<String>,
    owner: Option<HoverSource>,
}

impl HoverRouter {
    pub(super) fn offer(&mut self, source: HoverSource, candidate: Option<String>) {
        let slot = match source {
            HoverSource::Canvas => &mut self.canvas,
            HoverSource::Search => &mut self.search,
        };
        if *slot == candidate {
            return;
        }
        *slot = candidate.clone();

        if candidate.is_some() {
            self.owner = Some(source);
            self.inbox.push(candidate);
        } else if self.owner == Some(source) {
            self.owner = None;
            self.inbox.push(None);
        }
    }

    pub(super) fn take(&mut self) -> Option<HoverEvent> {
        self.inbox.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(router: &mut HoverRouter) -> Option<Option<String>> {
        router.take().map(|event| event.target)
    }

    #[test]
    fn moving_from_canvas_to_search_keeps_the_search_hover() {
        let mut router = HoverRouter::default();
        router.offer(HoverSource::Canvas, Some("a".into()));
        assert_eq!(target(&mut router), Some(Some("a".into())));

        // Panels run before the canvas within one frame.
        router.offer(HoverSource::Search, Some("b".into()));
        router.offer(HoverSource::Canvas, None);
        assert_eq!(target(&mut router), Some(Some("b".into())));

        router.offer(HoverSource::Search, Some("b".into()));
        router.offer(HoverSource::Canvas, None);
        assert_eq!(target(&mut router), None);
    }

    #[test]
    fn moving_from_search_to_canvas_hovers_the_node() {
        let mut router = HoverRouter::default();
        router.offer(HoverSource::Search, Some("b".into()));
        router.take();

        router.offer(HoverSource::Search, None);
        router.offer(HoverSource::Canvas, Some("a".into()));
        assert_eq!(target(&mut router), Some(Some("a".into())));
    }

    #[test]
    fn owner_leaving_clears_the_hover() {
        let mut router = HoverRouter::default();
        router.offer(HoverSource::Canvas, Some("a".into()));
        router.take();

        router.offer(HoverSource::Canvas, None);
        assert_eq!(target(&mut router), Some(None));

        router.offer(HoverSource::Search, None);
        assert_eq!(target(&mut router), None);
    }
}
