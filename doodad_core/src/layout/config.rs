// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration records for layout helpers.
//!
//! These are plain `Copy` values. Nothing in the layout core mutates them;
//! computation steps capture them by value.

/// Space reserved inside a rectangle's edges.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Padding {
    /// Space below the top edge.
    pub top: f64,
    /// Space left of the right edge.
    pub right: f64,
    /// Space above the bottom edge.
    pub bottom: f64,
    /// Space right of the left edge.
    pub left: f64,
}

impl Padding {
    /// No padding on any side.
    pub const ZERO: Self = Self::equal(0.0);

    /// The same amount on all four sides.
    #[must_use]
    pub const fn equal(amount: f64) -> Self {
        Self {
            top: amount,
            right: amount,
            bottom: amount,
            left: amount,
        }
    }

    /// `vertical` on top and bottom, `horizontal` on left and right.
    #[must_use]
    pub const fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Sum of left and right padding.
    #[must_use]
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of top and bottom padding.
    #[must_use]
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Main axis of a flow arrangement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Flow {
    /// Children stack downward.
    #[default]
    TopToBottom,
    /// Children line up rightward.
    LeftToRight,
}

/// Cross-axis placement for a top-to-bottom flow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HorizontalAlignment {
    /// Flush with the container's left edge plus left padding.
    #[default]
    Left,
    /// Centered on the container's horizontal midpoint (padding ignored).
    Center,
    /// Flush with the container's right edge minus right padding.
    Right,
}

/// Cross-axis placement for a left-to-right flow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalAlignment {
    /// Flush with the container's top edge plus top padding.
    #[default]
    Top,
    /// Centered on the container's vertical midpoint (padding ignored).
    Center,
    /// Flush with the container's bottom edge minus bottom padding.
    Bottom,
}

/// How a flow container's own size is derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SizeRule {
    /// The container shrinks to its children's bounding box plus padding.
    #[default]
    FitContents,
    /// The container keeps whatever size its other steps give it.
    Fill,
}

/// Configuration for [`arrange_flow`](super::arrange_flow).
///
/// The default is a top-to-bottom, left-aligned, unpadded flow with no gap
/// that fits its contents.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlowConfig {
    /// Main axis.
    pub flow: Flow,
    /// Gap between consecutive children along the main axis.
    pub space_between: f64,
    /// Padding inside the container.
    pub padding: Padding,
    /// Container sizing rule.
    pub size_rule: SizeRule,
    /// Cross-axis alignment used when `flow` is [`Flow::TopToBottom`].
    pub horizontal: HorizontalAlignment,
    /// Cross-axis alignment used when `flow` is [`Flow::LeftToRight`].
    pub vertical: VerticalAlignment,
}

impl FlowConfig {
    /// A top-to-bottom flow with the given gap.
    #[must_use]
    pub fn column(space_between: f64) -> Self {
        Self {
            flow: Flow::TopToBottom,
            space_between,
            ..Self::default()
        }
    }

    /// A left-to-right flow with the given gap.
    #[must_use]
    pub fn row(space_between: f64) -> Self {
        Self {
            flow: Flow::LeftToRight,
            space_between,
            ..Self::default()
        }
    }
}
