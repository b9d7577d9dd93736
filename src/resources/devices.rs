use crate::models::Device;
use crate::store::{Endpoints, Resource, ResourceIntent, ResourceStore, StoreError};
use crate::validation::{DeviceDraft, DevicePatch};

pub struct Devices;

impl Resource for Devices {
    type Entity = Device;
    type Draft = DeviceDraft;
    type Patch = DevicePatch;

    const NAME: &'static str = "devices";
    const ENVELOPE: &'static str = "device";
    const ENDPOINTS: Endpoints = Endpoints {
        list: "/showDevices",
        show: Some("/showDevice"),
        create: Some("/saveDevice"),
        update: "/updateDevice",
        delete: "/deleteDevice",
    };
}

pub type DeviceStore = ResourceStore<Devices>;

const SEARCH_PATH: &str = "/searchDevices";

impl ResourceStore<Devices> {
    /// Searches by free text and category, results into `scoped`.
    ///
    /// With neither filter set the cached collection is mirrored instead.
    pub async fn search(&self, query: &str, category: &str) -> Result<Vec<Device>, StoreError> {
        if query.is_empty() && category.is_empty() {
            let items = self.state().items;
            self.dispatch(ResourceIntent::ScopedListed {
                items: items.clone(),
            });
            return Ok(items);
        }
        let api = self.api();
        self.load_scoped(
            "search",
            api.get_with_query(SEARCH_PATH, &[("q", query), ("category", category)]),
        )
        .await
    }

    /// Devices currently free to borrow, from the cached collection.
    pub fn available(&self) -> Vec<Device> {
        self.state()
            .items
            .into_iter()
            .filter(Device::is_available)
            .collect()
    }

    /// Distinct categories of the cached collection, in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for device in self.state().items {
            if !device.category.is_empty() && !seen.contains(&device.category) {
                seen.push(device.category);
            }
        }
        seen
    }
}
