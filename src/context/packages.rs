//! Package contents: sub-packages, public types and package-level members.

use smol_str::SmolStr;

use super::Context;
use super::resolve::qualify;
use crate::base::{is_valid_package, is_valid_token};
use crate::model::{FlagType, MemberList, MemberModel, Visibility};
use crate::project::PathModel;

/// What a package contains across the classpath.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackageContents {
    pub name: SmolStr,
    /// Sub-packages (`PACKAGE`) and types, sorted by name.
    pub imports: MemberList,
    /// Package-level declarations.
    pub members: MemberList,
}

impl PackageContents {
    fn new(name: &str) -> Self {
        Self {
            name: SmolStr::from(name),
            ..Self::default()
        }
    }

    fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.members.is_empty()
    }

    fn add_entry(&mut self, name: &str, flags: FlagType) {
        if !is_valid_token(name) || self.imports.contains(name, FlagType::empty(), Visibility::empty()) {
            return;
        }
        let type_name = qualify(&self.name, name);
        self.imports
            .add(MemberModel::new(name, type_name, flags, Visibility::PUBLIC));
    }
}

impl Context {
    /// Contents of package `name` (`""` is the root package).
    ///
    /// Roots are listed on disk when `lazy` is set, when exploration is lazy
    /// or for the temporary root; otherwise their parsed models are walked.
    /// Returns `None` for invalid names and empty packages. Entries found in
    /// an earlier root shadow later ones.
    pub fn resolve_package(&self, name: &str, lazy: bool) -> Option<PackageContents> {
        if !name.is_empty() && !is_valid_package(name) {
            return None;
        }
        let mut contents = PackageContents::new(name);
        for root in self.classpath.searchable() {
            if lazy || self.is_lazy() || root.is_temporary() {
                self.list_package_entries(root, &mut contents);
            } else {
                collect_parsed_entries(root, &mut contents);
            }
        }
        if contents.is_empty() {
            tracing::trace!("[RESOLVE] package '{}' is empty", name);
            return None;
        }
        contents.imports.sort();
        Some(contents)
    }

    fn list_package_entries(&self, root: &PathModel, contents: &mut PackageContents) {
        let entries = root.list_package(&contents.name, &self.settings.default_extension);
        for dir in &entries.packages {
            contents.add_entry(dir, FlagType::PACKAGE);
        }
        for module in &entries.modules {
            contents.add_entry(module, FlagType::CLASS);
        }
    }
}

/// Walk the parsed models of one root.
fn collect_parsed_entries(root: &PathModel, contents: &mut PackageContents) {
    let name = contents.name.clone();
    let prefix = if name.is_empty() {
        String::new()
    } else {
        format!("{name}.")
    };
    let mut previous_package: Option<SmolStr> = None;

    for file in root.files() {
        if file.ignored || (!file.has_package && file.version < 2) {
            continue;
        }
        let package = &file.package;
        if *package == name {
            for class in &file.classes {
                if class.index_type.is_some() || class.access.contains(Visibility::PRIVATE) {
                    continue;
                }
                if !contents
                    .imports
                    .contains(&class.name, FlagType::empty(), Visibility::empty())
                {
                    contents.imports.add(class.to_member_model());
                }
            }
            for member in file.members.iter() {
                if !contents
                    .members
                    .contains(&member.name, FlagType::empty(), Visibility::empty())
                {
                    contents.members.add(member.clone());
                }
            }
        } else if previous_package.as_ref() != Some(package)
            && package.len() > name.len()
            && package.starts_with(prefix.as_str())
        {
            previous_package = Some(package.clone());
            let rest = &package[prefix.len()..];
            let sub = rest.split('.').next().unwrap_or(rest);
            if !contents.imports.contains(sub, FlagType::empty(), Visibility::empty()) {
                contents
                    .imports
                    .add(MemberModel::new(sub, qualify(&name, sub), FlagType::PACKAGE, Visibility::PUBLIC));
            }
        }
    }
}
