use crate::camera::common::error::Result;
use crate::camera::sensor::store::SensorStore;

pub trait SceneReader {
    fn read_scene(&self, data: &[u8]) -> Result<SensorStore>;
}
