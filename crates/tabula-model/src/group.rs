use crate::error::ModelError;
use crate::frame::Frame;

/// A frame paired with the ordered list of columns that partition its rows.
///
/// Grouping metadata travels explicitly alongside the frame instead of being
/// attached to the frame value. Transformations that produce a new frame
/// reattach the grouping with [`GroupedFrame::with_frame`], which re-validates
/// that every group column survived.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupedFrame {
    frame: Frame,
    group_vars: Vec<String>,
}

impl GroupedFrame {
    /// Group `frame` by the named columns, in order.
    ///
    /// Duplicate names collapse to their first occurrence; every name must
    /// exist in the frame.
    pub fn new(frame: Frame, group_vars: Vec<String>) -> Result<Self, ModelError> {
        let mut vars: Vec<String> = Vec::with_capacity(group_vars.len());
        for name in group_vars {
            if !frame.has_column(&name) {
                return Err(ModelError::UnknownColumn { name });
            }
            if !vars.contains(&name) {
                vars.push(name);
            }
        }
        Ok(Self {
            frame,
            group_vars: vars,
        })
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// The ordered group column names.
    pub fn group_vars(&self) -> &[String] {
        &self.group_vars
    }

    /// Discard the grouping, returning the underlying frame.
    pub fn ungroup(self) -> Frame {
        self.frame
    }

    /// Reattach this grouping to a transformed frame.
    pub fn with_frame(&self, frame: Frame) -> Result<Self, ModelError> {
        Self::new(frame, self.group_vars.clone())
    }
}
