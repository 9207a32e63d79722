use crate::areas::refs::HEAD_REF_NAME;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::OBJECT_ID_LENGTH;

/// Minimum hex prefix length accepted when resolving abbreviated object IDs
const MIN_OID_PREFIX_LENGTH: usize = 4;

/// A revision specification naming a commit-ish:
///
/// - `HEAD`
/// - a branch name: `master`, `feature/recipes`
/// - a full 40-character object ID
/// - an abbreviated object ID of at least 4 hex characters
///
/// Branch names win over object IDs when a string could be either. Resolution
/// yields `None` when nothing matches; the caller decides how to report that.
#[derive(Debug, Clone)]
pub struct Revision {
    raw: String,
}

impl Revision {
    pub fn parse(revision: &str) -> Self {
        Revision {
            raw: revision.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<Option<ObjectId>> {
        if self.raw == HEAD_REF_NAME {
            return repository.refs().read_head();
        }

        if let Ok(branch_name) = BranchName::try_parse(self.raw.clone()) {
            if let Some(oid) = repository.refs().read_branch(&branch_name)? {
                return Ok(Some(oid));
            }
        }

        if Self::looks_like_oid(&self.raw) {
            return self.resolve_oid(repository);
        }

        Ok(None)
    }

    fn resolve_oid(&self, repository: &Repository) -> anyhow::Result<Option<ObjectId>> {
        if self.raw.len() == OBJECT_ID_LENGTH {
            let oid = ObjectId::try_parse(self.raw.clone())?;
            if repository.database().load(&oid).is_ok() {
                return Ok(Some(oid));
            }
            return Ok(None);
        }

        // abbreviated: only an unambiguous prefix resolves
        let matches = repository.database().find_objects_by_prefix(&self.raw)?;
        match matches.as_slice() {
            [oid] => Ok(Some(oid.clone())),
            _ => Ok(None),
        }
    }

    fn looks_like_oid(s: &str) -> bool {
        s.len() >= MIN_OID_PREFIX_LENGTH
            && s.len() <= OBJECT_ID_LENGTH
            && s.chars().all(|c| c.is_ascii_hexdigit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_strings_of_reasonable_length_look_like_oids() {
        assert!(Revision::looks_like_oid("a1b2"));
        assert!(Revision::looks_like_oid("a1b2c3d"));
        assert!(Revision::looks_like_oid(&"a".repeat(40)));
    }

    #[test]
    fn short_or_non_hex_strings_do_not_look_like_oids() {
        assert!(!Revision::looks_like_oid("abc"));
        assert!(!Revision::looks_like_oid("not-hex"));
        assert!(!Revision::looks_like_oid(&"a".repeat(41)));
    }
}
