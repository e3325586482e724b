//! Review Submission
//!
//! Form state for rating a rented car. The form validates locally and hands
//! a [`ReviewSubmission`] to a caller-supplied handler; persisting it is the
//! caller's business.
//!
//! Rating is chosen with discrete 1–5 star clicks. Hovering a star previews
//! the fill without committing it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest accepted star rating
pub const MIN_RATING: u8 = 1;
/// Highest accepted star rating
pub const MAX_RATING: u8 = 5;

const DEFAULT_RATING: u8 = MAX_RATING;

/// Validated review payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSubmission {
    pub rating: u8,
    pub comment: String,
}

impl ReviewSubmission {
    /// Validate a rating and comment
    ///
    /// The comment check runs first, so a form that is wrong on both counts
    /// reports the missing comment.
    pub fn new(rating: u8, comment: impl Into<String>) -> Result<Self, ReviewError> {
        let comment = comment.into();
        if comment.trim().is_empty() {
            return Err(ReviewError::CommentRequired);
        }
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ReviewError::RatingOutOfRange);
        }
        Ok(Self { rating, comment })
    }
}

/// Review validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("Comment is required.")]
    CommentRequired,

    #[error("Rating must be between 1 and 5.")]
    RatingOutOfRange,

    #[error("Review form is not open")]
    NotOpen,
}

/// Modal review form
#[derive(Debug, Clone)]
pub struct ReviewForm {
    open: bool,
    item_label: String,
    rating: u8,
    hovered: Option<u8>,
    comment: String,
    error: Option<ReviewError>,
}

/// What a renderer needs to draw an open form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewFormView {
    /// Name of the item under review, e.g. "Toyota Corolla"
    pub item_label: String,
    /// Fill state for stars 1 through 5
    pub stars: [bool; 5],
    pub comment: String,
    /// Inline error message from the last rejected submit
    pub error: Option<String>,
}

impl Default for ReviewForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewForm {
    /// A closed form
    pub fn new() -> Self {
        Self {
            open: false,
            item_label: String::new(),
            rating: DEFAULT_RATING,
            hovered: None,
            comment: String::new(),
            error: None,
        }
    }

    /// Open for the given item, starting from a clean five-star draft
    pub fn open(&mut self, item_label: impl Into<String>) {
        *self = Self {
            open: true,
            item_label: item_label.into(),
            ..Self::new()
        };
    }

    pub fn close(&mut self) {
        self.open = false;
        self.hovered = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Committed rating
    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn error(&self) -> Option<&ReviewError> {
        self.error.as_ref()
    }

    /// Preview a rating while the pointer is over a star
    pub fn hover(&mut self, star: u8) {
        self.hovered = Some(star).filter(|s| *s > 0);
    }

    /// Pointer left the stars
    pub fn leave(&mut self) {
        self.hovered = None;
    }

    /// Commit a star click
    pub fn select(&mut self, star: u8) {
        self.rating = star;
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    /// Rating the stars currently show: the hover preview, else the commit
    pub fn displayed_rating(&self) -> u8 {
        self.hovered.unwrap_or(self.rating)
    }

    /// Render state; `None` while closed
    pub fn view(&self) -> Option<ReviewFormView> {
        if !self.open {
            return None;
        }

        let shown = self.displayed_rating();
        let mut stars = [false; 5];
        for (i, star) in stars.iter_mut().enumerate() {
            *star = (i as u8) < shown;
        }

        Some(ReviewFormView {
            item_label: self.item_label.clone(),
            stars,
            comment: self.comment.clone(),
            error: self.error.as_ref().map(ToString::to_string),
        })
    }

    /// Validate and hand the payload to `on_submit`
    ///
    /// On rejection the error is kept for inline display and `on_submit` is
    /// not called. On success the error is cleared and `on_submit` runs once.
    pub fn submit<F>(&mut self, on_submit: F) -> Result<(), ReviewError>
    where
        F: FnOnce(ReviewSubmission),
    {
        if !self.open {
            return Err(ReviewError::NotOpen);
        }

        match ReviewSubmission::new(self.rating, self.comment.clone()) {
            Ok(submission) => {
                self.error = None;
                tracing::debug!(rating = submission.rating, item = %self.item_label, "Review submitted");
                on_submit(submission);
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }
}
