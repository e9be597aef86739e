use std::sync::Arc;

use statusview_core::display::DisplayOptions;
use statusview_core::error::Result;
use statusview_core::render::PageView;

use crate::feed::FeedHub;
use crate::view::widgets::{DatabaseStatusWidget, UpdatedAtWidget};

/// The status page: heading, updated-at line, database listing.
pub struct StatusPage {
    updated_at: UpdatedAtWidget,
    database: DatabaseStatusWidget,
    opts: DisplayOptions,
}

impl StatusPage {
    /// Mount both widgets on `endpoint`. Polling starts now if no other
    /// consumer already polls that endpoint.
    pub fn mount(hub: &Arc<FeedHub>, endpoint: &str, opts: DisplayOptions) -> Self {
        Self {
            updated_at: UpdatedAtWidget::mount(hub, endpoint, opts),
            database: DatabaseStatusWidget::mount(hub, endpoint, opts),
            opts,
        }
    }

    pub fn endpoint(&self) -> &str {
        self.updated_at.sub.endpoint()
    }

    /// Both widgets render from one model, so a publish racing the render
    /// cannot mix two snapshots in one view.
    pub fn render(&self) -> PageView {
        let model = self.updated_at.sub.current();
        PageView::new(
            &self.opts,
            self.updated_at.render_model(&model),
            self.database.render_model(&model),
        )
    }

    /// Wait for the next published model. Both widgets share the feed, so
    /// one publish wakes the page once.
    pub async fn changed(&mut self) -> Result<()> {
        tokio::select! {
            r = self.updated_at.sub.changed() => r?,
            r = self.database.sub.changed() => r?,
        }
        self.updated_at.sub.mark_seen();
        self.database.sub.mark_seen();
        Ok(())
    }

    /// Release both subscriptions; the last consumer of a feed stops it.
    pub fn unmount(self) {
        tracing::debug!(endpoint = %self.endpoint(), "status page unmounted");
    }
}
