// Wire models for the management API
//
// Request and response bodies for the site, template, and inventory
// endpoints. The API both omits unset fields and sends them as `null`, so
// response fields are either `Option` or read through `null_as_default`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Sites ────────────────────────────────────────────────────────────

/// Geographic coordinates of a site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Location fields merged into every site creation request.
///
/// Supplied by configuration rather than by the operator. Unset fields are
/// omitted from the request body so the API applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latlng: Option<LatLng>,
}

/// Body of `POST /orgs/{org}/sites`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gatewaytemplate_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub networktemplate_id: Option<String>,
    #[serde(flatten)]
    pub location: LocationSettings,
}

/// A site as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub gatewaytemplate_id: Option<String>,
    #[serde(default)]
    pub networktemplate_id: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latlng: Option<LatLng>,
}

/// Body of `PUT /sites/{site}/setting`.
#[derive(Debug, Serialize)]
pub(crate) struct SiteSettingsPatch<'a> {
    pub vars: &'a Map<String, Value>,
}

// ── Templates ────────────────────────────────────────────────────────

/// A WLAN template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub applies: TemplateApplies,
}

/// The `applies` document of a template.
///
/// Only `site_ids` is interpreted; every other key (org-wide flags, site
/// groups) lands in `extra` and is written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateApplies {
    #[serde(default, deserialize_with = "null_as_default")]
    pub site_ids: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `PUT /orgs/{org}/templates/{template}`.
#[derive(Debug, Serialize)]
pub(crate) struct TemplateUpdate<'a> {
    pub applies: &'a TemplateApplies,
}

/// What [`attach_site_to_template`](crate::MistClient::attach_site_to_template) did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateAttach {
    /// The site id was appended and the template written back.
    Attached,
    /// The site id was already listed; nothing was written.
    AlreadyAttached,
}

// ── Inventory ────────────────────────────────────────────────────────

/// A device from the org inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryDevice {
    pub mac: String,
    #[serde(default)]
    pub serial: Option<String>,
    #[serde(rename = "type", default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// `None` while the device sits in the unassigned pool.
    #[serde(default)]
    pub site_id: Option<String>,
}

impl InventoryDevice {
    pub fn is_unassigned(&self) -> bool {
        self.site_id.is_none()
    }
}

/// Body of `PUT /orgs/{org}/inventory` for the `assign` operation.
#[derive(Debug, Serialize)]
pub(crate) struct AssignDevicesRequest<'a> {
    pub op: &'static str,
    pub site_id: &'a str,
    pub macs: &'a [String],
    pub managed: bool,
    pub disable_auto_config: bool,
}

/// Per-MAC outcome of an assignment request.
///
/// `error[i]` failed for `reason[i]`; the pairing is positional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub error: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reason: Vec<String>,
}
