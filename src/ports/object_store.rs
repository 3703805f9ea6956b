use crate::error::SampleResult;
use crate::model::{ObjectHandle, Template};

/// Capability to search for and destroy objects on the token
pub trait ObjectStore {
    /// Find every object whose attributes include all of `template`
    ///
    /// Runs the full `C_FindObjectsInit` / `C_FindObjects` /
    /// `C_FindObjectsFinal` cycle. An empty result is not an error.
    fn find_objects(&mut self, template: &Template) -> SampleResult<Vec<ObjectHandle>>;

    /// `C_DestroyObject`
    fn destroy_object(&mut self, object: ObjectHandle) -> SampleResult<()>;
}
