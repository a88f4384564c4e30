//! Type resolution: names, typed indexes, literal tokens and classpath lookups.

use smol_str::SmolStr;
use std::path::PathBuf;
use std::sync::Arc;

use super::{Context, IndexedType};
use crate::base::constants::{DOT, INDEX_SEPARATOR};
use crate::base::{is_valid_package, is_valid_token};
use crate::model::{ClassModel, FileModel, FlagType, MemberModel, Visibility};
use crate::project::PathModel;

const PROXY_TYPE: &str = "flash.utils.Proxy";

/// Split `a.b.C` into (`a.b`, `C`).
pub(crate) fn split_qualified(name: &str) -> (&str, &str) {
    match name.rfind(DOT) {
        Some(idx) => (&name[..idx], &name[idx + 1..]),
        None => ("", name),
    }
}

/// Join a package and a name (`a.b` + `C`).
pub(crate) fn qualify(package: &str, name: &str) -> SmolStr {
    if package.is_empty() {
        SmolStr::from(name)
    } else {
        SmolStr::from(format!("{package}{DOT}{name}"))
    }
}

fn is_numeric_literal(token: &str) -> bool {
    let bytes = token.as_bytes();
    let digit_at = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);
    digit_at(0)
        || (matches!(bytes.first(), Some(b'-' | b'+')) && digit_at(1))
        || (bytes.len() > 2
            && (bytes.starts_with(b"--") || bytes.starts_with(b"++"))
            && digit_at(2))
}

impl Context {
    /// Resolve a short or qualified type name as seen from `in_file`.
    ///
    /// Returns the void sentinel when nothing matches.
    pub fn resolve_type(&self, name: &str, in_file: Option<&FileModel>) -> Arc<ClassModel> {
        if name.is_empty() || self.features.void_key == name || !self.started {
            return ClassModel::void();
        }
        if name.contains(INDEX_SEPARATOR) {
            return self.resolve_type_index(name, in_file);
        }

        let (package, cname) = split_qualified(name);
        let mut package = package.to_string();

        // same file
        if let Some(file) = in_file
            && let Some(class) = file
                .classes
                .iter()
                .find(|c| c.name == cname && (package.is_empty() || file.package == package.as_str()))
        {
            tracing::trace!("[RESOLVE] '{}' found in current file", name);
            return Arc::clone(class);
        }

        let in_package = match in_file {
            Some(file) if self.features.has_packages => file.package.clone(),
            _ => SmolStr::default(),
        };

        if package.is_empty()
            && let Some(file) = in_file
        {
            // explicit imports win over wildcards, whatever their order
            if let Some(import) = file.imports.iter().find(|i| i.name == cname) {
                if import.type_name.len() > import.name.len() {
                    package = import.type_name[..import.type_name.len() - cname.len() - 1].to_string();
                }
                tracing::trace!("[RESOLVE] '{}' imported from '{}'", cname, package);
            } else {
                for import in file.imports.iter() {
                    let test_package = if self.features.has_imports_wildcard {
                        if !import.is_wildcard() || import.type_name.len() <= 2 {
                            continue;
                        }
                        &import.type_name[..import.type_name.len() - 2]
                    } else {
                        import.type_name.as_str()
                    };
                    if let Some(found) = self.resolve_in_import_package(test_package, cname, &in_package) {
                        return found;
                    }
                }
            }
        }

        self.get_model(&package, cname, &in_package)
    }

    /// Look for `cname` in one imported package.
    fn resolve_in_import_package(
        &self,
        package: &str,
        cname: &str,
        in_package: &str,
    ) -> Option<Arc<ClassModel>> {
        if self.is_lazy() {
            let class = self.get_model(package, cname, in_package);
            return (!class.is_void()).then_some(class);
        }
        let contents = self.resolve_package(package, false)?;
        let entry = contents.imports.search(cname, FlagType::empty(), Visibility::empty())?;
        if entry.flags.contains(FlagType::PACKAGE) {
            return None;
        }
        let class = self.resolve_type(&entry.type_name, None);
        (!class.is_void()).then_some(class)
    }

    /// Resolve `Base@Index`: a clone of `Base` whose `Object`/`*` typed
    /// members are retyped to `Index`.
    ///
    /// Clones are cached until their base class is re-parsed.
    pub fn resolve_type_index(&self, name: &str, in_file: Option<&FileModel>) -> Arc<ClassModel> {
        let Some((base, index)) = name.split_once(INDEX_SEPARATOR) else {
            return ClassModel::void();
        };
        let original = self.resolve_type(base, in_file);
        if original.is_void() {
            return original;
        }
        let base_name = original.qualified_name();
        let index_class = self.resolve_type(index, in_file);

        if base_name == self.features.dynamic_key {
            return if index_class.is_void() {
                self.make_custom_object_class(&original, index)
            } else {
                index_class
            };
        }
        if index_class.is_void() {
            return original;
        }
        let index_name = index_class.qualified_name();
        let key = SmolStr::from(format!("{base_name}{INDEX_SEPARATOR}{index_name}"));

        if let Some(cached) = self.cached_indexed_type(&key, &original) {
            return cached;
        }

        let mut clone = (*original).clone();
        clone.name = key.clone();
        clone.index_type = Some(index_name.clone());
        if base_name == PROXY_TYPE {
            clone.extends_type = index_name;
        } else {
            let object_key = &self.features.object_key;
            let is_generic = |t: &SmolStr| t == object_key || t == "*";
            for member in clone.members.iter_mut() {
                if is_generic(&member.type_name) {
                    member.type_name = index_name.clone();
                }
                for param in member.parameters.iter_mut() {
                    if param.name == "value" && is_generic(&param.type_name) {
                        param.type_name = index_name.clone();
                    }
                }
            }
        }
        tracing::trace!("[RESOLVE] typed clone '{}'", key);
        self.store_indexed_type(key, original, clone)
    }

    /// Custom object type with one dynamic field per comma-separated name.
    fn make_custom_object_class(&self, object_class: &Arc<ClassModel>, fields: &str) -> Arc<ClassModel> {
        let key = SmolStr::from(format!("{}{INDEX_SEPARATOR}{fields}", object_class.qualified_name()));
        if let Some(cached) = self.cached_indexed_type(&key, object_class) {
            return cached;
        }
        let mut class = ClassModel::new(key.clone(), object_class.package.clone());
        class.flags = object_class.flags;
        class.access = object_class.access;
        class.file = object_class.file.clone();
        class.index_type = Some(SmolStr::from(fields));
        let flags = FlagType::DYNAMIC | FlagType::VARIABLE | FlagType::AUTOMATIC_VAR;
        for field in fields.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            class
                .members
                .add(MemberModel::new(field, "", flags, Visibility::PUBLIC));
        }
        self.store_indexed_type(key, Arc::clone(object_class), class)
    }

    fn cached_indexed_type(&self, key: &str, source: &Arc<ClassModel>) -> Option<Arc<ClassModel>> {
        let cache = self.indexed_types.lock();
        cache
            .get(key)
            .filter(|entry| Arc::ptr_eq(&entry.source, source))
            .map(|entry| Arc::clone(&entry.class))
    }

    fn store_indexed_type(&self, key: SmolStr, source: Arc<ClassModel>, class: ClassModel) -> Arc<ClassModel> {
        let class = Arc::new(class);
        self.indexed_types.lock().insert(
            key,
            IndexedType {
                source,
                class: Arc::clone(&class),
            },
        );
        class
    }

    /// Type of a literal token (`true`, `12`, `"s"`, `{}`, `[]`), or of a
    /// type name otherwise.
    pub fn resolve_token(&self, token: &str, in_file: Option<&FileModel>) -> Arc<ClassModel> {
        if token.is_empty() {
            return ClassModel::void();
        }
        let features = &self.features;
        if token == "true" || token == "false" {
            return self.resolve_type(&features.boolean_key, in_file);
        }
        if is_numeric_literal(token) {
            return match &features.integer_key {
                Some(int) if !token.contains('.') && !token.contains('e') => self.resolve_type(int, in_file),
                _ => self.resolve_type(&features.number_key, in_file),
            };
        }
        let first = token.as_bytes()[0];
        let last = token.as_bytes()[token.len() - 1];
        if first == b'{' && last == b'}' {
            return self.resolve_type(&features.object_key, in_file);
        }
        if first == b'[' && last == b']' {
            return self.resolve_type(&features.array_key, in_file);
        }
        if token.len() > 1 && (first == b'"' || first == b'\'') && last == first {
            return self.resolve_type(&features.string_key, in_file);
        }
        self.resolve_type(token, in_file)
    }

    // ========================================================================
    // CLASSPATH LOOKUP
    // ========================================================================

    /// Find a type by package and name across the classpath roots.
    ///
    /// Eager exploration walks the parsed models of every searchable root
    /// (the requesting package first for unqualified names), then guesses
    /// the file in the temporary root. Lazy exploration guesses
    /// `package/Name.as` in every searchable root, trying the requesting
    /// package first for unqualified names.
    pub fn get_model(&self, package: &str, cname: &str, in_package: &str) -> Arc<ClassModel> {
        if !self.is_lazy() {
            let test_same_package = package.is_empty() && self.features.has_packages;
            let test_module = !package.is_empty() && self.features.has_modules;
            if test_same_package && !in_package.is_empty() {
                for root in self.classpath.searchable() {
                    if let Some(found) = self.lookup_class(in_package, cname, in_package, false, false, root) {
                        tracing::trace!("[RESOLVE] '{}' found in same package", cname);
                        return found;
                    }
                }
            }
            for root in self.classpath.searchable() {
                if let Some(found) =
                    self.lookup_class(package, cname, in_package, test_same_package, test_module, root)
                {
                    tracing::trace!("[RESOLVE] '{}' found in {}", cname, root.path().display());
                    return found;
                }
            }
            if let Some(temporary) = self.classpath.temporary() {
                for file_name in self.candidate_files(package, cname, in_package) {
                    if let Some(found) = self.locate_class_file(temporary, &file_name) {
                        return found;
                    }
                }
            }
        } else {
            for file_name in self.candidate_files(package, cname, in_package) {
                for root in self.classpath.searchable() {
                    if let Some(found) = self.locate_class_file(root, &file_name) {
                        tracing::trace!("[RESOLVE] '{}' located in {}", cname, root.path().display());
                        return found;
                    }
                }
            }
        }
        tracing::trace!("[RESOLVE] '{}' not found in package '{}'", cname, package);
        ClassModel::void()
    }

    /// Files that may declare `cname`: the requesting package first for
    /// unqualified names, then `package` itself.
    fn candidate_files(&self, package: &str, cname: &str, in_package: &str) -> Vec<PathBuf> {
        let mut candidates = Vec::with_capacity(2);
        if package.is_empty() && self.features.has_packages && !in_package.is_empty() {
            candidates.extend(self.class_file_name(in_package, cname));
        }
        candidates.extend(self.class_file_name(package, cname));
        candidates
    }

    /// `a/b/Name.as` for a valid package and name.
    fn class_file_name(&self, package: &str, cname: &str) -> Option<PathBuf> {
        if !is_valid_token(cname) || (!package.is_empty() && !is_valid_package(package)) {
            return None;
        }
        let mut file_name: PathBuf = package.split(DOT).filter(|s| !s.is_empty()).collect();
        file_name.push(format!("{cname}{}", self.settings.default_extension));
        Some(file_name)
    }

    /// Search the parsed models of one root.
    fn lookup_class(
        &self,
        package: &str,
        cname: &str,
        in_package: &str,
        test_same_package: bool,
        test_module: bool,
        root: &PathModel,
    ) -> Option<Arc<ClassModel>> {
        let match_parent = test_same_package && self.features.has_friendly_parent_packages;
        let parent_prefix_ok = |pkg: &str| {
            pkg.len() < in_package.len()
                && in_package.starts_with(pkg)
                && in_package[pkg.len()..].starts_with(DOT)
        };

        root.find_file(|file| {
            if file.ignored {
                return None;
            }
            let pkg = file.package.as_str();
            let module = file.module_name();
            if pkg == package && !file.classes.is_empty() {
                file.classes
                    .iter()
                    .find(|c| c.name == cname && (pkg.is_empty() || module.is_empty() || c.name == module))
                    .cloned()
            } else if test_module && qualify(pkg, module) == package && !file.classes.is_empty() {
                file.classes.iter().find(|c| c.name == cname).cloned()
            } else if test_same_package
                && (in_package == pkg || (match_parent && parent_prefix_ok(pkg)))
            {
                file.classes.iter().find(|c| c.name == cname).cloned()
            } else {
                None
            }
        })
    }

    /// Public class of `root/file_name`, loading the file when needed.
    ///
    /// An IO failure invalidates the root.
    pub(crate) fn locate_class_file(&self, root: &PathModel, file_name: &std::path::Path) -> Option<Arc<ClassModel>> {
        if !root.is_valid() {
            return None;
        }
        match root.locate(file_name) {
            Ok(Some(model)) => {
                let class = model.public_class();
                (!class.is_void()).then_some(class)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("[RESOLVE] lookup of {} failed: {}", file_name.display(), e);
                None
            }
        }
    }
}
