use serde::{Deserialize, Serialize};

use showbill_db::choices::split_genres;
use showbill_db::entities::venue;
use showbill_db::repo::venues::VenueInput;

use super::{
    check_genres, check_phone, check_seeking_description, check_state, check_url, checkbox,
    required, ValidationErrors,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub website_link: String,
    pub image_link: String,
    #[serde(deserialize_with = "checkbox")]
    pub seeking_talent: bool,
    pub seeking_description: String,
}

impl VenueForm {
    /// Pre-fill the form from a stored venue for editing.
    pub fn from_model(v: &venue::Model) -> Self {
        Self {
            name: v.name.clone(),
            city: v.city.clone(),
            state: v.state.clone(),
            address: v.address.clone(),
            phone: v.phone.clone().unwrap_or_default(),
            genres: split_genres(&v.genres),
            facebook_link: v.facebook_link.clone().unwrap_or_default(),
            website_link: v.website_link.clone().unwrap_or_default(),
            image_link: v.image_link.clone().unwrap_or_default(),
            seeking_talent: v.seeking_talent,
            seeking_description: v.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<VenueInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = required(&mut errors, "name", &self.name, "Name is required");
        let city = required(&mut errors, "city", &self.city, "City is required");
        let state = check_state(&mut errors, &self.state, "State is required");
        let address = required(&mut errors, "address", &self.address, "Address is required.");
        let phone = check_phone(&mut errors, &self.phone);
        let genres = check_genres(&mut errors, &self.genres);
        let facebook_link = check_url(
            &mut errors,
            "facebook_link",
            &self.facebook_link,
            "Invalid Facebook URL provided.",
        );
        let website_link = check_url(
            &mut errors,
            "website_link",
            &self.website_link,
            "Invalid Website URL provided.",
        );
        let image_link = check_url(
            &mut errors,
            "image_link",
            &self.image_link,
            "Invalid Image URL provided.",
        );
        let seeking_description = check_seeking_description(&mut errors, &self.seeking_description);

        errors.into_result(|| VenueInput {
            name,
            city,
            state,
            address,
            phone,
            image_link,
            facebook_link,
            website_link,
            genres,
            seeking_talent: self.seeking_talent,
            seeking_description,
        })
    }
}
