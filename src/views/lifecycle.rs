//! Pure view-model rules for the booking and order lifecycle: which label
//! and severity a stage renders with, and which actions are enabled. No
//! I/O happens here; everything derives from server-reflected state.

use crate::domain::{
    BookingStage, NotificationKind, Order, OrderDraft, OrderStatus, PaymentStatus, ProductStatus,
};

/// Visual weight of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub severity: Severity,
}

// ===== Product stage (detail page) =====

/// What a buyer sees and may do for a product at its current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageView {
    pub badge: StatusBadge,
    pub can_book: bool,
    pub can_confirm_payment: bool,
}

/// Availability alone gates booking; payment confirmation appears only
/// once a meeting is scheduled and disappears after it is confirmed.
pub fn product_stage(status: ProductStatus, payment_confirmed: bool) -> StageView {
    match status {
        ProductStatus::Available => StageView {
            badge: StatusBadge {
                label: "Available",
                severity: Severity::Success,
            },
            can_book: true,
            can_confirm_payment: false,
        },
        ProductStatus::PendingConfirmation => StageView {
            badge: StatusBadge {
                label: "Awaiting Seller Confirmation",
                severity: Severity::Warning,
            },
            can_book: false,
            can_confirm_payment: false,
        },
        ProductStatus::MeetingScheduled => StageView {
            badge: StatusBadge {
                label: "Meeting Scheduled",
                severity: Severity::Info,
            },
            can_book: false,
            can_confirm_payment: !payment_confirmed,
        },
        ProductStatus::Sold => StageView {
            badge: StatusBadge {
                label: "Sold",
                severity: Severity::Neutral,
            },
            can_book: false,
            can_confirm_payment: false,
        },
    }
}

// ===== Buyer bookings list =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingView {
    pub badge: StatusBadge,
    pub can_confirm_payment: bool,
}

pub fn booking_progress(stage: BookingStage, payment_confirmed: bool) -> BookingView {
    let badge = match stage {
        BookingStage::PendingConfirmation => StatusBadge {
            label: "Awaiting Seller",
            severity: Severity::Warning,
        },
        BookingStage::Confirmed => StatusBadge {
            label: "Meeting Confirmed",
            severity: Severity::Info,
        },
        BookingStage::MeetingScheduled => StatusBadge {
            label: "Meeting Scheduled",
            severity: Severity::Info,
        },
        BookingStage::Sold => StatusBadge {
            label: "Payment Done - Sold",
            severity: Severity::Success,
        },
        BookingStage::Cancelled => StatusBadge {
            label: "Booking Cancelled",
            severity: Severity::Danger,
        },
        BookingStage::Unknown => StatusBadge {
            label: "Processing",
            severity: Severity::Neutral,
        },
    };
    BookingView {
        badge,
        can_confirm_payment: stage == BookingStage::MeetingScheduled && !payment_confirmed,
    }
}

// ===== Acknowledgement gate =====

/// Two-step commit gate in front of irreversible confirmations ("I agree
/// to meet", "I have paid"). Arming strictly follows the checkbox: it is
/// never sticky, so toggling off disables the action again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcknowledgeGate {
    armed: bool,
}

impl AcknowledgeGate {
    pub fn new() -> Self {
        AcknowledgeGate::default()
    }

    pub fn set(&mut self, acknowledged: bool) {
        self.armed = acknowledged;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Dialogs reset the gate on open and close.
    #[allow(dead_code)]
    pub fn reset(&mut self) {
        self.armed = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentControl {
    pub visible: bool,
    pub enabled: bool,
}

#[allow(dead_code)]
pub fn payment_control(
    stage: BookingStage,
    payment_confirmed: bool,
    gate: AcknowledgeGate,
) -> PaymentControl {
    let visible = booking_progress(stage, payment_confirmed).can_confirm_payment;
    PaymentControl {
        visible,
        enabled: visible && gate.is_armed(),
    }
}

// ===== Meeting confirmation =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeetingConfirmationView {
    /// Set when there is nothing staged to confirm.
    pub error: Option<&'static str>,
    pub can_confirm: bool,
}

/// The meeting-confirmation page works off the staged checkout snapshot;
/// without one it shows the error state and keeps confirmation disabled.
pub fn meeting_confirmation_view(
    draft: Option<&OrderDraft>,
    gate: AcknowledgeGate,
) -> MeetingConfirmationView {
    match draft {
        None => MeetingConfirmationView {
            error: Some("No order to confirm"),
            can_confirm: false,
        },
        Some(_) => MeetingConfirmationView {
            error: None,
            can_confirm: gate.is_armed(),
        },
    }
}

// ===== Payment page =====

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentView {
    /// Only the order's owner gets the payment controls.
    pub is_buyer: bool,
    /// `None` renders the "seller has not provided UPI details" state.
    pub seller_upi: Option<String>,
    pub amount: f64,
}

pub fn payment_view(order: &Order, viewer_id: &str) -> PaymentView {
    PaymentView {
        is_buyer: order.user == viewer_id,
        seller_upi: order
            .items
            .first()
            .and_then(|item| item.seller.as_ref())
            .and_then(|seller| seller.upi_number.clone()),
        amount: order.total_amount,
    }
}

// ===== Order history =====

/// The linear fulfilment track shown on the order detail page.
/// `meeting_scheduled` and `cancelled` sit outside it.
pub const ORDER_PROGRESS: [OrderStatus; 4] = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
];

#[allow(dead_code)]
pub fn order_progress_index(status: OrderStatus) -> Option<usize> {
    ORDER_PROGRESS.iter().position(|step| *step == status)
}

#[allow(dead_code)]
pub fn order_status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "Pending",
        OrderStatus::MeetingScheduled => "Meeting Scheduled",
        OrderStatus::Confirmed => "Confirmed",
        OrderStatus::Shipped => "Shipped",
        OrderStatus::Delivered => "Delivered",
        OrderStatus::Cancelled => "Cancelled",
    }
}

#[allow(dead_code)]
pub fn payment_status_badge(status: PaymentStatus) -> StatusBadge {
    match status {
        PaymentStatus::Paid => StatusBadge {
            label: "Paid",
            severity: Severity::Success,
        },
        PaymentStatus::Failed => StatusBadge {
            label: "Failed",
            severity: Severity::Danger,
        },
        PaymentStatus::Pending => StatusBadge {
            label: "Pending",
            severity: Severity::Warning,
        },
    }
}

// ===== Notifications =====

pub fn notification_badge(kind: NotificationKind) -> StatusBadge {
    match kind {
        NotificationKind::BookingRequest => StatusBadge {
            label: "Booking Request",
            severity: Severity::Info,
        },
        NotificationKind::SellerConfirmed => StatusBadge {
            label: "Meeting Confirmed",
            severity: Severity::Success,
        },
        NotificationKind::BuyerConfirmed => StatusBadge {
            label: "Buyer Confirmed",
            severity: Severity::Info,
        },
        NotificationKind::PaymentCompleted => StatusBadge {
            label: "Payment Completed",
            severity: Severity::Success,
        },
        NotificationKind::Other => StatusBadge {
            label: "Notification",
            severity: Severity::Neutral,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn booking_is_enabled_only_while_available() {
        let stages = [
            (ProductStatus::Available, true),
            (ProductStatus::PendingConfirmation, false),
            (ProductStatus::MeetingScheduled, false),
            (ProductStatus::Sold, false),
        ];
        for (status, expected) in stages {
            assert_eq!(product_stage(status, false).can_book, expected);
        }
    }

    #[test]
    fn payment_confirmation_requires_scheduled_meeting_and_no_payment() {
        for stage in [
            BookingStage::PendingConfirmation,
            BookingStage::Confirmed,
            BookingStage::MeetingScheduled,
            BookingStage::Sold,
            BookingStage::Cancelled,
            BookingStage::Unknown,
        ] {
            for paid in [false, true] {
                let expected = stage == BookingStage::MeetingScheduled && !paid;
                assert_eq!(
                    booking_progress(stage, paid).can_confirm_payment,
                    expected,
                    "stage {stage:?}, paid {paid}"
                );
            }
        }
    }

    #[test]
    fn gate_is_not_sticky() {
        let mut gate = AcknowledgeGate::new();
        gate.set(true);
        assert!(payment_control(BookingStage::MeetingScheduled, false, gate).enabled);

        gate.set(false);
        let control = payment_control(BookingStage::MeetingScheduled, false, gate);
        assert!(control.visible);
        assert!(!control.enabled);
    }

    #[test]
    fn gate_never_enables_a_hidden_control() {
        let mut gate = AcknowledgeGate::new();
        gate.set(true);
        let control = payment_control(BookingStage::Sold, false, gate);
        assert!(!control.visible);
        assert!(!control.enabled);
    }

    #[test]
    fn missing_draft_disables_meeting_confirmation() {
        let mut gate = AcknowledgeGate::new();
        gate.set(true);

        let view = meeting_confirmation_view(None, gate);
        assert_eq!(view.error, Some("No order to confirm"));
        assert!(!view.can_confirm);
    }

    #[test]
    fn staged_draft_confirms_only_when_acknowledged() {
        let draft = OrderDraft {
            items: Vec::new(),
            total_amount: 99.0,
            buyer_confirmed: false,
            status: OrderStatus::Pending,
            meeting_location: Some("Block 34".to_string()),
        };

        let gate = AcknowledgeGate::new();
        assert!(!meeting_confirmation_view(Some(&draft), gate).can_confirm);

        let mut armed = gate;
        armed.set(true);
        assert!(meeting_confirmation_view(Some(&draft), armed).can_confirm);
    }

    #[test]
    fn payment_view_identifies_the_buyer_and_missing_upi() {
        let order: Order = serde_json::from_value(json!({
            "_id": "o1",
            "items": [{
                "product": {
                    "_id": "p1",
                    "title": "Desk lamp",
                    "price": 150.0,
                    "createdAt": "2025-08-12T09:30:00.000Z"
                },
                "seller": { "_id": "s1", "name": "Priya" },
                "quantity": 1,
                "price": 150.0
            }],
            "totalAmount": 150.0,
            "status": "meeting_scheduled",
            "user": "u1",
            "createdAt": "2025-08-14T08:00:00.000Z"
        }))
        .unwrap();

        let as_buyer = payment_view(&order, "u1");
        assert!(as_buyer.is_buyer);
        assert_eq!(as_buyer.seller_upi, None);
        assert_eq!(as_buyer.amount, 150.0);

        assert!(!payment_view(&order, "someone-else").is_buyer);
    }

    #[test]
    fn fulfilment_track_skips_out_of_band_statuses() {
        assert_eq!(order_progress_index(OrderStatus::Pending), Some(0));
        assert_eq!(order_progress_index(OrderStatus::Delivered), Some(3));
        assert_eq!(order_progress_index(OrderStatus::Cancelled), None);
        assert_eq!(order_progress_index(OrderStatus::MeetingScheduled), None);
    }
}
