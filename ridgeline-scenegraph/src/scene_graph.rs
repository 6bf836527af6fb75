use std::collections::HashMap;

use crate::error::RidgelineSceneGraphError;
use crate::marks::{group::SceneGroup, mark::SceneMark};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneGraph {
    pub marks: Vec<SceneMark>,
    pub width: f32,
    pub height: f32,
    pub origin: [f32; 2],
}

impl SceneGraph {
    pub fn groups(&self) -> Vec<&SceneGroup> {
        self.marks
            .iter()
            .filter_map(|m| {
                let SceneMark::Group(g) = m else {
                    return None;
                };
                Some(g)
            })
            .collect()
    }

    pub fn children(&self) -> &[SceneMark] {
        &self.marks
    }

    pub fn get_mark(&self, mark_path: &[usize]) -> Option<&SceneMark> {
        // empty path is the root, which is not a mark
        let (first, rest) = mark_path.split_first()?;
        let mut child = self.marks.get(*first)?;
        for index in rest {
            child = child.children().get(*index)?;
        }
        Some(child)
    }

    /// Returns the absolute origin of a group
    pub fn get_absolute_origin(&self, group_path: &[usize]) -> Option<[f32; 2]> {
        let mut origin = self.origin;
        let mut marks = &self.marks;
        for index in group_path {
            let SceneMark::Group(group) = marks.get(*index)? else {
                return None;
            };
            origin = [origin[0] + group.origin[0], origin[1] + group.origin[1]];
            marks = &group.marks;
        }
        Some(origin)
    }

    /// Returns all of the group paths in the scene graph
    pub fn group_paths(&self) -> Vec<Vec<usize>> {
        let mut paths = vec![];
        for (index, mark) in self.marks.iter().enumerate() {
            let SceneMark::Group(group) = mark else {
                continue;
            };
            paths.push(vec![index]);
            for sub_path in group.group_paths() {
                let mut path = vec![index];
                path.extend(sub_path);
                paths.push(path);
            }
        }
        paths
    }

    /// Returns mapping from the names of each named group to their path
    pub fn group_names(&self) -> HashMap<String, Vec<usize>> {
        let mut names = HashMap::new();
        for path in self.group_paths() {
            let Some(SceneMark::Group(group)) = self.get_mark(&path) else {
                continue;
            };
            if !group.name.is_empty() {
                names.insert(group.name.clone(), path);
            }
        }
        names
    }

    /// Look up a named group anywhere in the tree
    pub fn find_group(&self, name: &str) -> Option<&SceneGroup> {
        let path = self.group_names().remove(name)?;
        match self.get_mark(&path)? {
            SceneMark::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), RidgelineSceneGraphError> {
        self.marks.iter().try_for_each(|m| m.validate())
    }
}
