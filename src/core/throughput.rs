//! Offer lookup for throughput scaling

use crate::domain::Offer;

/// Finds the offer provisioned for a resource
///
/// Linear scan; the first offer whose `offer_resource_id` equals
/// `resource_id` wins.
pub fn find_offer<'a>(offers: &'a [Offer], resource_id: &str) -> Option<&'a Offer> {
    offers
        .iter()
        .find(|offer| offer.offer_resource_id == resource_id)
}
