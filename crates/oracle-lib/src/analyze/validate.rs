//! Reference validation.
//!
//! Resolution and dependency extraction are deliberately permissive: they
//! skip what they cannot resolve so partially loaded tables stay usable.
//! This pass reports what they skipped, before outputs are trusted for
//! code generation.

use indexmap::IndexSet;
use oracle_core::{Form, RefTarget, StructForm, Type, TypeRef};

use crate::Config;
use crate::diagnostics::{DiagnosticKind, Diagnostics, Severity};
use crate::resolution::{Table, unified_fields};

/// Check every user declaration in `table`.
pub fn validate(table: &Table, config: &Config) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    for ty in table.user_types() {
        let mut validator = Validator {
            table,
            config,
            ty,
            diagnostics: &mut diagnostics,
        };
        validator.check();
    }
    diagnostics
}

struct Validator<'a> {
    table: &'a Table,
    config: &'a Config,
    ty: &'a Type,
    diagnostics: &'a mut Diagnostics,
}

impl Validator<'_> {
    fn check(&mut self) {
        let ty = self.ty;
        match &ty.form {
            Form::Struct(form) => {
                self.check_parents(form);
                if self.config.check_omissions {
                    self.check_omissions(form);
                }
                for parent in &form.extends {
                    for arg in &parent.type_args {
                        self.check_ref(arg);
                    }
                }
                for field in &form.fields {
                    self.check_ref(&field.type_ref);
                }
            }
            Form::Alias(alias) => self.check_ref(&alias.target),
            Form::Distinct(distinct) => self.check_ref(&distinct.base),
            Form::Enum(_) | Form::Primitive { .. } | Form::BuiltinGeneric { .. } => {}
        }
        for param in ty.form.type_params() {
            for bound in param.constraint.iter().chain(&param.default) {
                self.check_ref(bound);
            }
        }
    }

    fn check_parents(&mut self, form: &StructForm) {
        let (table, ty) = (self.table, self.ty);
        for parent_ref in &form.extends {
            match table.resolve(parent_ref, &ty.namespace) {
                None => self.report(DiagnosticKind::UnknownParent, parent_ref.to_string()),
                Some(parent) if parent.as_struct().is_none() => {
                    self.report(DiagnosticKind::ParentNotStruct, parent.qualified_name.clone())
                }
                Some(_) => {}
            }
        }

        if let Some(path) = self.inheritance_cycle() {
            self.diagnostics
                .report(DiagnosticKind::CircularInheritance, &ty.qualified_name)
                .message(&ty.qualified_name)
                .origin(&ty.file_path)
                .hint(format!("cycle: {}", path.join(" -> ")))
                .emit();
        }
    }

    /// Path from this declaration back to itself through `extends`, if any.
    fn inheritance_cycle(&self) -> Option<Vec<String>> {
        let mut path = vec![self.ty.qualified_name.clone()];
        let mut seen = IndexSet::new();
        self.reaches_self(self.ty, &mut path, &mut seen)
            .then_some(path)
    }

    fn reaches_self(&self, current: &Type, path: &mut Vec<String>, seen: &mut IndexSet<String>) -> bool {
        let Some(form) = current.as_struct() else {
            return false;
        };
        for parent_ref in &form.extends {
            let Some(parent) = self.table.resolve(parent_ref, &current.namespace) else {
                continue;
            };
            path.push(parent.qualified_name.clone());
            if parent.qualified_name == self.ty.qualified_name {
                return true;
            }
            if seen.insert(parent.qualified_name.clone()) && self.reaches_self(parent, path, seen) {
                return true;
            }
            path.pop();
        }
        false
    }

    fn check_omissions(&mut self, form: &StructForm) {
        let (table, ty) = (self.table, self.ty);
        let inherited: IndexSet<String> = form
            .extends
            .iter()
            .filter_map(|r| table.resolve(r, &ty.namespace))
            .flat_map(|parent| unified_fields(parent, table))
            .map(|f| f.name)
            .collect();

        for omitted in &form.omitted_fields {
            if !inherited.contains(omitted) {
                self.report(DiagnosticKind::UnknownOmittedField, omitted.clone());
            }
        }
    }

    fn check_ref(&mut self, root: &TypeRef) {
        let (table, ty) = (self.table, self.ty);
        for r in root.walk() {
            match &r.target {
                RefTarget::Param(name) => {
                    if !ty.form.type_params().iter().any(|p| &p.name == name) {
                        self.report(DiagnosticKind::UndefinedTypeParam, name.clone());
                    }
                }
                RefTarget::Named(name) => match table.resolve(r, &ty.namespace) {
                    None => {
                        let severity = if self.config.tolerate_partial {
                            Severity::Warning
                        } else {
                            Severity::Error
                        };
                        self.diagnostics
                            .report(DiagnosticKind::UndefinedReference, &ty.qualified_name)
                            .message(name)
                            .origin(&ty.file_path)
                            .severity(severity)
                            .emit();
                    }
                    Some(target) => {
                        if let Form::BuiltinGeneric { arity, .. } = &target.form
                            && r.type_args.len() != *arity
                        {
                            self.report(
                                DiagnosticKind::GenericArityMismatch,
                                format!(
                                    "`{name}` expects {arity}, found {}",
                                    r.type_args.len()
                                ),
                            );
                        }
                    }
                },
            }
        }
    }

    fn report(&mut self, kind: DiagnosticKind, detail: String) {
        self.diagnostics
            .report(kind, &self.ty.qualified_name)
            .message(detail)
            .origin(&self.ty.file_path)
            .emit();
    }
}
