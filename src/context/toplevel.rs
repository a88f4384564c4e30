//! Top-level intrinsics: `toplevel.as` declarations plus `this`, `super`,
//! `_root`, `_global` and the void type.

use smol_str::SmolStr;

use super::Context;
use crate::base::constants::TOPLEVEL_FILE;
use crate::model::{FileModel, FlagType, MemberList, MemberModel, Visibility};

impl Context {
    /// Load the top-level declarations from the first root holding
    /// `toplevel.as` and complete them with the built-in globals.
    pub(crate) fn init_top_level_elements(&mut self) {
        let mut top_level = FileModel::new(TOPLEVEL_FILE);

        let found = self.classpath.iter().find_map(|root| {
            let path = root.path().join(TOPLEVEL_FILE);
            if !path.is_file() {
                return None;
            }
            match root.load(&path) {
                Ok(model) => model,
                Err(e) => {
                    tracing::warn!("[CLASSPATH] cannot load {}: {}", path.display(), e);
                    None
                }
            }
        });
        if let Some(model) = found {
            top_level = (*model).clone();
            // declarations wrapped in a class become plain globals
            let class = model.public_class();
            if !class.is_void() {
                top_level.members = class.members.clone();
                top_level.classes.clear();
            }
            tracing::debug!("[CLASSPATH] top-level declarations from {}", model.path.display());
        }

        let features = &self.features;
        let builtins = [
            (features.doc_type.clone(), SmolStr::new_static("_root"), FlagType::VARIABLE),
            (features.object_key.clone(), SmolStr::new_static("_global"), FlagType::VARIABLE),
            (SmolStr::default(), SmolStr::new_static("this"), FlagType::VARIABLE),
            (SmolStr::default(), SmolStr::new_static("super"), FlagType::VARIABLE),
            (SmolStr::default(), features.void_key.clone(), FlagType::CLASS | FlagType::INTRINSIC),
        ];
        for (type_name, name, flags) in builtins {
            if !top_level.members.contains(&name, FlagType::empty(), Visibility::empty()) {
                top_level
                    .members
                    .add(MemberModel::new(name, type_name, flags, Visibility::PUBLIC));
            }
        }
        top_level.members.sort();
        for member in top_level.members.iter_mut() {
            member.flags |= FlagType::INTRINSIC;
        }
        self.top_level = top_level;
        self.update_top_level_elements();
    }

    /// Retype `this` and `super` for the current class.
    pub(crate) fn update_top_level_elements(&mut self) {
        let script = self.current_file.as_ref().is_none_or(|f| f.version <= 1);
        let this_type = if !self.current_class.is_void() {
            self.current_class.qualified_name()
        } else if script {
            self.features.doc_type.clone()
        } else {
            self.features.void_key.clone()
        };
        let extends = self.resolve_extends(&self.current_class);
        let super_type = if !extends.is_void() {
            extends.qualified_name()
        } else if script {
            self.features.object_key.clone()
        } else {
            self.features.void_key.clone()
        };

        let members = &mut self.top_level.members;
        if let Some(this) = members.search_mut("this", FlagType::empty(), Visibility::empty()) {
            this.type_name = this_type;
        }
        if let Some(sup) = members.search_mut("super", FlagType::empty(), Visibility::empty()) {
            sup.type_name = super_type;
        }
    }

    /// Top-level elements of the current file (intrinsics included).
    pub fn top_level_elements(&self) -> &MemberList {
        &self.top_level.members
    }

    /// The top-level model (`toplevel.as` or a virtual file).
    pub fn top_level(&self) -> &FileModel {
        &self.top_level
    }
}
