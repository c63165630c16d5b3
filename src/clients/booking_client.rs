use serde_json::json;
use tracing::{debug, info, instrument};

use crate::api::ApiClient;
use crate::domain::{
    Booking, BookingProposal, BuyerBooking, MeetingPlace, Product, ProductStatus,
    DEFAULT_PROPOSED_TIME,
};
use crate::error::BookingError;
use crate::impl_client_new;

/// Client for the booking endpoints, buyer and seller sides both.
#[derive(Clone)]
pub struct BookingClient {
    inner: ApiClient,
}

impl_client_new!(BookingClient);

impl BookingClient {
    /// Requests a meeting for an available product. Blank proposal fields
    /// fall back to the product's own meeting location and a
    /// "to be decided" time; a location the product also lacks is simply
    /// not sent.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    #[allow(dead_code)]
    pub async fn book_product(
        &self,
        product: &Product,
        proposal: BookingProposal,
    ) -> Result<(), BookingError> {
        if product.status != ProductStatus::Available {
            return Err(BookingError::ProductUnavailable);
        }

        let location = proposal
            .location
            .filter(|location| !location.trim().is_empty())
            .or_else(|| product.meeting_location.clone());
        let time = proposal
            .time
            .filter(|time| !time.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROPOSED_TIME.to_string());

        debug!("Sending request");
        let mut body = json!({
            "productId": product.id,
            "proposedTime": time,
        });
        if let Some(location) = location {
            body["proposedLocation"] = json!(location);
        }

        self.inner
            .post::<serde_json::Value>("/bookings", body)
            .await
            .map_err(BookingError::from)?;
        info!("Booking requested");
        Ok(())
    }

    /// Incoming booking requests for the signed-in seller.
    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn seller_requests(&self) -> Result<Vec<Booking>, BookingError> {
        debug!("Sending request");
        self.inner
            .get("/bookings/seller/requests")
            .await
            .map_err(BookingError::from)
    }

    /// The signed-in buyer's bookings.
    #[instrument(skip(self))]
    pub async fn my_bookings(&self) -> Result<Vec<BuyerBooking>, BookingError> {
        debug!("Sending request");
        self.inner
            .get("/bookings/buyer/my-bookings")
            .await
            .map_err(BookingError::from)
    }

    /// Seller locks in the meeting. Blank inputs fall back to what the
    /// buyer proposed; no location from either side is an error.
    #[instrument(skip(self, booking), fields(booking_id = %booking.id))]
    #[allow(dead_code)]
    pub async fn confirm_meeting(
        &self,
        booking: &Booking,
        place: MeetingPlace,
    ) -> Result<(), BookingError> {
        let location = place
            .location
            .filter(|location| !location.trim().is_empty())
            .or_else(|| booking.meeting_details.proposed_location.clone());
        let Some(location) = location else {
            return Err(BookingError::MissingLocation);
        };
        let time = place
            .time
            .filter(|time| !time.trim().is_empty())
            .or_else(|| booking.meeting_details.proposed_time.clone());

        debug!("Sending request");
        let mut body = json!({ "confirmedLocation": location });
        if let Some(time) = time {
            body["confirmedTime"] = json!(time);
        }

        self.inner
            .put::<serde_json::Value>(format!("/bookings/{}/confirm-meeting", booking.id), body)
            .await
            .map_err(BookingError::from)?;
        info!("Meeting confirmed");
        Ok(())
    }

    /// Seller declines the request. Terminal for the booking.
    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn reject_booking(&self, booking_id: &str) -> Result<(), BookingError> {
        debug!("Sending request");
        self.inner
            .put_empty::<serde_json::Value>(format!("/bookings/{booking_id}/reject"))
            .await
            .map_err(BookingError::from)?;
        info!("Booking rejected");
        Ok(())
    }

    /// Buyer's manual "I have paid" assertion. Returns the updated
    /// booking so the list entry can be replaced in place.
    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn confirm_payment(&self, booking_id: &str) -> Result<BuyerBooking, BookingError> {
        debug!("Sending request");
        let booking: BuyerBooking = self
            .inner
            .put_empty(format!("/bookings/{booking_id}/confirm-payment"))
            .await?;
        info!("Payment confirmed");
        Ok(booking)
    }
}
