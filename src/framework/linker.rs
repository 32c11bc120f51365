//! # Extension Linker
//!
//! Resolves `extends` at creation time. The linker walks the parent chain once
//! to reject unknown parents and cycles, then overlays the child's own
//! resolvers on top of the parent's flattened ones. Because every stored
//! definition is already flattened, a single overlay covers grandparents and
//! beyond, and execution never walks the chain.

use crate::framework::definition::{MappingDefinition, MappingHook, ResolverMap};
use crate::framework::error::MapperError;
use crate::framework::key::MappingKey;
use std::collections::HashMap;
use std::sync::Arc;

/// `base` overlaid with `own`; entries in `own` win on member collision.
pub fn overlay(base: &ResolverMap, own: &ResolverMap) -> ResolverMap {
    let mut merged = base.clone();
    for (member, resolver) in own {
        merged.insert(member.clone(), resolver.clone());
    }
    merged
}

/// Output of [`ExtensionLinker::link`].
#[derive(Debug)]
pub struct LinkedMapping {
    pub resolvers: ResolverMap,
    pub before_map: Option<MappingHook>,
    pub after_map: Option<MappingHook>,
}

pub struct ExtensionLinker<'a> {
    definitions: &'a HashMap<MappingKey, Arc<MappingDefinition>>,
}

impl<'a> ExtensionLinker<'a> {
    pub fn new(definitions: &'a HashMap<MappingKey, Arc<MappingDefinition>>) -> Self {
        Self { definitions }
    }

    /// Ancestors of `child`, nearest first, starting from `parent`.
    ///
    /// `child` itself need not be registered yet. If it is (replacement), a
    /// chain that leads back to it is a cycle.
    pub fn ancestry(
        &self,
        child: MappingKey,
        parent: MappingKey,
    ) -> Result<Vec<&'a MappingDefinition>, MapperError> {
        let mut chain = vec![child];
        let mut ancestors = Vec::new();
        let mut next = Some(parent);

        while let Some(key) = next {
            let seen = chain.contains(&key);
            chain.push(key);
            if seen {
                return Err(MapperError::CyclicExtension { chain });
            }

            let definition = self.definitions.get(&key).ok_or_else(|| {
                MapperError::UnknownParentMapping {
                    child: chain[chain.len() - 2],
                    parent: key,
                }
            })?;
            ancestors.push(definition.as_ref());
            next = definition.parent();
        }

        Ok(ancestors)
    }

    /// Produces the flattened resolver set and effective hooks for `child`.
    pub fn link(
        &self,
        child: MappingKey,
        parent: Option<MappingKey>,
        own: &ResolverMap,
        before_map: Option<MappingHook>,
        after_map: Option<MappingHook>,
    ) -> Result<LinkedMapping, MapperError> {
        let Some(parent) = parent else {
            return Ok(LinkedMapping {
                resolvers: own.clone(),
                before_map,
                after_map,
            });
        };

        let ancestors = self.ancestry(child, parent)?;
        // On success the chain holds at least the parent.
        let nearest = ancestors[0];

        Ok(LinkedMapping {
            resolvers: overlay(nearest.resolvers(), own),
            before_map: before_map.or_else(|| nearest.before_map().cloned()),
            after_map: after_map.or_else(|| nearest.after_map().cloned()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::definition::MappingOptions;
    use crate::framework::resolver::{from_value, ignore};

    struct A;
    struct ADto;
    struct B;
    struct BDto;
    struct C;
    struct CDto;

    fn store(
        definitions: &mut HashMap<MappingKey, Arc<MappingDefinition>>,
        key: MappingKey,
        options: MappingOptions,
    ) -> Result<(), MapperError> {
        let own = options.own_resolvers(key);
        let (before, after) = options.own_hooks(key);
        let linked = ExtensionLinker::new(definitions).link(key, options.parent(), &own, before, after)?;
        definitions.insert(
            key,
            Arc::new(MappingDefinition::new(
                key,
                options.parent(),
                own,
                linked.resolvers,
                linked.before_map,
                linked.after_map,
            )),
        );
        Ok(())
    }

    #[test]
    fn grandchild_sees_every_ancestor() {
        let (a, b, c) = (
            MappingKey::of::<A, ADto>(),
            MappingKey::of::<B, BDto>(),
            MappingKey::of::<C, CDto>(),
        );
        let mut definitions = HashMap::new();
        store(&mut definitions, a, MappingOptions::new().for_member("x", from_value(1))).unwrap();
        store(
            &mut definitions,
            b,
            MappingOptions::new().extends(a).for_member("y", from_value(2)),
        )
        .unwrap();
        store(
            &mut definitions,
            c,
            MappingOptions::new().extends(b).for_member("x", ignore()),
        )
        .unwrap();

        let grandchild = &definitions[&c];
        assert_eq!(grandchild.resolvers().len(), 2);
        assert_eq!(grandchild.resolver("y").unwrap().origin(), b);
        assert_eq!(grandchild.resolver("x").unwrap().origin(), c);
        assert_eq!(grandchild.own_resolvers().len(), 1);

        let ancestry = ExtensionLinker::new(&definitions).ancestry(c, b).unwrap();
        let keys: Vec<_> = ancestry.iter().map(|d| d.key()).collect();
        assert_eq!(keys, vec![b, a]);
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let definitions = HashMap::new();
        let (a, b) = (MappingKey::of::<A, ADto>(), MappingKey::of::<B, BDto>());
        let err = ExtensionLinker::new(&definitions).ancestry(b, a).unwrap_err();
        assert!(matches!(
            err,
            MapperError::UnknownParentMapping { child, parent } if child == b && parent == a
        ));
    }

    #[test]
    fn self_extension_is_a_cycle() {
        let definitions = HashMap::new();
        let a = MappingKey::of::<A, ADto>();
        let err = ExtensionLinker::new(&definitions).ancestry(a, a).unwrap_err();
        assert!(matches!(err, MapperError::CyclicExtension { ref chain } if chain == &vec![a, a]));
    }

    #[test]
    fn chain_back_to_child_is_a_cycle() {
        let (a, b) = (MappingKey::of::<A, ADto>(), MappingKey::of::<B, BDto>());
        let mut definitions = HashMap::new();
        store(&mut definitions, a, MappingOptions::new()).unwrap();
        store(&mut definitions, b, MappingOptions::new().extends(a)).unwrap();

        // Redefining `a` on top of `b` would close the loop a -> b -> a.
        let err = ExtensionLinker::new(&definitions).ancestry(a, b).unwrap_err();
        assert!(matches!(err, MapperError::CyclicExtension { ref chain } if chain == &vec![a, b, a]));
    }
}
