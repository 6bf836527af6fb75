use std::sync::Arc;

use crate::error::RidgelineSceneGraphError;
use crate::marks::area::SceneAreaMark;
use crate::marks::group::SceneGroup;
use crate::marks::rule::SceneRuleMark;
use crate::marks::text::SceneTextMark;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneMark {
    Area(SceneAreaMark),
    Rule(SceneRuleMark),
    Text(Arc<SceneTextMark>),
    Group(SceneGroup),
}

impl SceneMark {
    pub fn zindex(&self) -> Option<i32> {
        match self {
            Self::Area(mark) => mark.zindex,
            Self::Rule(mark) => mark.zindex,
            Self::Text(mark) => mark.zindex,
            Self::Group(mark) => mark.zindex,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Area(mark) => &mark.name,
            Self::Rule(mark) => &mark.name,
            Self::Text(mark) => &mark.name,
            Self::Group(mark) => &mark.name,
        }
    }

    pub fn children(&self) -> &[SceneMark] {
        match self {
            Self::Group(mark) => &mark.marks,
            _ => &[],
        }
    }

    /// Check that every array-valued channel has one entry per instance
    pub fn validate(&self) -> Result<(), RidgelineSceneGraphError> {
        match self {
            Self::Area(mark) => mark.validate(),
            Self::Rule(mark) => mark.validate(),
            Self::Text(mark) => mark.validate(),
            Self::Group(group) => group.marks.iter().try_for_each(|m| m.validate()),
        }
    }
}

/// Shared length check for array-valued channels
pub(crate) fn check_len<T: Sync + Clone>(
    name: &str,
    channel: &'static str,
    value: &ridgeline_common::value::ScalarOrArray<T>,
    expected: usize,
) -> Result<(), RidgelineSceneGraphError> {
    match value.array_len() {
        Some(actual) if actual != expected => {
            Err(RidgelineSceneGraphError::EncodingLengthMismatch {
                name: name.to_string(),
                channel,
                expected,
                actual,
            })
        }
        _ => Ok(()),
    }
}
