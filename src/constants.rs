//! Enumerated codes used by the Outseta API.
//!
//! Outseta sends these as plain integers. Model fields keep the raw
//! integer so unknown codes never break deserialization; the enums here
//! convert with [`TryFrom<i32>`] and `value()`, and serialize as their code.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::OutsetaError;

macro_rules! int_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Integer code sent over the wire.
            pub fn value(self) -> i32 {
                match self {
                    $( Self::$variant => $code, )+
                }
            }
        }

        impl TryFrom<i32> for $name {
            type Error = OutsetaError;

            fn try_from(code: i32) -> Result<Self, Self::Error> {
                match code {
                    $( $code => Ok(Self::$variant), )+
                    other => Err(OutsetaError::InvalidArgument(format!(
                        "{} is not a valid {} code",
                        other,
                        stringify!($name)
                    ))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $( Self::$variant => f.write_str(stringify!($variant)), )+
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_i32(self.value())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let code = i32::deserialize(deserializer)?;
                Self::try_from(code).map_err(serde::de::Error::custom)
            }
        }
    };
}

int_enum! {
    /// Lifecycle stage of an account.
    pub enum AccountStage {
        Trialing = 2,
        Subscribing = 3,
        Cancelling = 4,
        Expired = 5,
        TrialExpired = 6,
        PastDue = 7,
    }
}

int_enum! {
    /// Kind of an activity-feed entry.
    pub enum ActivityType {
        Custom = 10,
        Note = 50,
        Email = 51,
        PhoneCall = 52,
        Meeting = 53,
        AccountCreated = 100,
        AccountUpdated = 101,
        AccountAddPerson = 102,
        AccountStageUpdated = 103,
        AccountDeleted = 104,
        AccountBillingInformationUpdated = 105,
        PersonCreated = 200,
        PersonUpdated = 201,
        PersonDeleted = 202,
        PersonLogin = 203,
        PersonListSubscribed = 204,
        PersonListUnsubscribed = 205,
        PersonSegmentAdded = 206,
        PersonSegmentRemoved = 207,
        PersonEmailOpened = 208,
        PersonEmailClicked = 209,
        PersonEmailBounce = 210,
        PersonEmailSpam = 211,
        PersonSupportTicketCreated = 212,
        PersonSupportTicketUpdated = 213,
        DealCreated = 300,
        DealUpdated = 301,
        DealAddPerson = 302,
        DealAddAccount = 303,
    }
}

int_enum! {
    /// How often a subscription renews.
    pub enum BillingRenewalTerm {
        Monthly = 1,
        Yearly = 2,
        Quarterly = 3,
        OneTime = 4,
    }
}

int_enum! {
    /// Kind of entry on an account's billing history.
    pub enum BillingTransactionType {
        Invoice = 1,
        Payment = 2,
        Credit = 3,
        Refund = 4,
        Chargeback = 5,
    }
}

int_enum! {
    /// Channel a support case arrived through.
    pub enum CaseSource {
        Website = 1,
        Email = 2,
        Facebook = 3,
        Twitter = 4,
    }
}

int_enum! {
    /// Whether a support case still needs attention.
    pub enum CaseStatus {
        Open = 1,
        Closed = 2,
    }
}

int_enum! {
    /// How long a discount coupon applies once redeemed.
    pub enum DiscountDuration {
        Forever = 1,
        Once = 2,
        Repeating = 3,
    }
}

int_enum! {
    /// Entity an activity is attached to.
    pub enum EntityType {
        Account = 1,
        Person = 2,
        Deal = 3,
    }
}

/// Sort direction for list requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Sort {
    #[default]
    Asc,
    Desc,
}

impl Sort {
    /// Keyword sent in `orderBy`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
