//! Translation between the boundary and persistence representations of a
//! customer. Both functions copy all seven attributes verbatim and are exact
//! inverses of each other, so no information is lost crossing the storage
//! boundary in either direction.

use crate::domain::customer::{Customer, CustomerRecord};

pub fn to_record(customer: Customer) -> CustomerRecord {
    CustomerRecord {
        id: customer.id,
        first_name: customer.first_name,
        last_name: customer.last_name,
        address: customer.address,
        phone_number: customer.phone_number,
        date_of_birth: customer.date_of_birth,
        national_security_number: customer.national_security_number,
    }
}

pub fn to_customer(record: CustomerRecord) -> Customer {
    Customer {
        id: record.id,
        first_name: record.first_name,
        last_name: record.last_name,
        address: record.address,
        phone_number: record.phone_number,
        date_of_birth: record.date_of_birth,
        national_security_number: record.national_security_number,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{to_customer, to_record};
    use crate::domain::customer::{Customer, CustomerId, CustomerRecord};

    fn full_customer() -> Customer {
        Customer {
            id: Some(CustomerId(12)),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            address: Some("1234 Elm Street".to_string()),
            phone_number: Some("080-322-3344".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1980, 1, 1),
            national_security_number: Some("123-45-6789".to_string()),
        }
    }

    #[test]
    fn round_trip_from_customer_is_field_for_field_identity() {
        let customer = full_customer();

        let round_tripped = to_customer(to_record(customer.clone()));

        assert_eq!(round_tripped, customer);
    }

    #[test]
    fn round_trip_from_record_is_field_for_field_identity() {
        let record = CustomerRecord {
            id: Some(CustomerId(3)),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            address: None,
            phone_number: None,
            date_of_birth: None,
            national_security_number: None,
        };

        let round_tripped = to_record(to_customer(record.clone()));

        assert_eq!(round_tripped, record);
    }

    #[test]
    fn every_attribute_is_copied_verbatim() {
        let record = to_record(full_customer());

        assert_eq!(record.id, Some(CustomerId(12)));
        assert_eq!(record.first_name, "John");
        assert_eq!(record.last_name, "Doe");
        assert_eq!(record.address.as_deref(), Some("1234 Elm Street"));
        assert_eq!(record.phone_number.as_deref(), Some("080-322-3344"));
        assert_eq!(record.date_of_birth, NaiveDate::from_ymd_opt(1980, 1, 1));
        assert_eq!(record.national_security_number.as_deref(), Some("123-45-6789"));
    }

    #[test]
    fn absent_input_maps_to_absent_output() {
        assert_eq!(None::<Customer>.map(to_record), None);
        assert_eq!(None::<CustomerRecord>.map(to_customer), None);
    }

    #[test]
    fn absent_identifier_survives_both_directions() {
        let mut customer = full_customer();
        customer.id = None;

        let record = to_record(customer.clone());
        assert_eq!(record.id, None);
        assert_eq!(to_customer(record), customer);
    }
}
