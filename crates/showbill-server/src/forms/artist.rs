use serde::{Deserialize, Serialize};

use showbill_db::choices::split_genres;
use showbill_db::entities::artist;
use showbill_db::repo::artists::ArtistInput;

use super::{
    check_genres, check_phone, check_seeking_description, check_state, check_url, checkbox,
    required, ValidationErrors,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub image_link: String,
    pub website_link: String,
    #[serde(deserialize_with = "checkbox")]
    pub seeking_venue: bool,
    pub seeking_description: String,
}

impl ArtistForm {
    pub fn from_model(a: &artist::Model) -> Self {
        Self {
            name: a.name.clone(),
            city: a.city.clone(),
            state: a.state.clone(),
            phone: a.phone.clone().unwrap_or_default(),
            genres: split_genres(&a.genres),
            facebook_link: a.facebook_link.clone().unwrap_or_default(),
            image_link: a.image_link.clone().unwrap_or_default(),
            website_link: a.website_link.clone().unwrap_or_default(),
            seeking_venue: a.seeking_venue,
            seeking_description: a.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<ArtistInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = required(&mut errors, "name", &self.name, "Artist name is required.");
        let city = required(&mut errors, "city", &self.city, "City is required.");
        let state = check_state(&mut errors, &self.state, "State is required.");
        let phone = check_phone(&mut errors, &self.phone);
        let genres = check_genres(&mut errors, &self.genres);
        let facebook_link = check_url(
            &mut errors,
            "facebook_link",
            &self.facebook_link,
            "Invalid Facebook URL provided.",
        );
        let image_link = check_url(
            &mut errors,
            "image_link",
            &self.image_link,
            "Invalid Image URL provided.",
        );
        let website_link = check_url(
            &mut errors,
            "website_link",
            &self.website_link,
            "Invalid Website URL provided.",
        );
        let seeking_description = check_seeking_description(&mut errors, &self.seeking_description);

        errors.into_result(|| ArtistInput {
            name,
            city,
            state,
            phone,
            genres,
            image_link,
            facebook_link,
            website_link,
            seeking_venue: self.seeking_venue,
            seeking_description,
        })
    }
}
