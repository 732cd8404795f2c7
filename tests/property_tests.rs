//! Property-based tests for the publishing domain
//!
//! - Equal organizations hash equally (std `Hash` and `hash_code`)
//! - Every named sort produces a sorted, stable permutation
//! - Deep copies stay equal until either side is mutated

use chrono::NaiveDate;
use proptest::prelude::*;
use publisher_lab::{Book, Organization, OrganizationOrder, Person, Publisher, PublisherCollection, Size};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

// =============================================================================
// Generators
// =============================================================================

fn arb_organization() -> impl Strategy<Value = Organization> {
    ("[A-Z][a-z]{0,6}", "[A-Z][a-z]{0,6}", 1900i32..=2000)
        .prop_map(|(name, address, year)| Organization::new_unchecked(name, address, year))
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1950i32..2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_person() -> impl Strategy<Value = Person> {
    ("[A-Z][a-z]{1,5}", "[A-Z][a-z]{1,5}", arb_date())
        .prop_map(|(first, last, born)| Person::new(first, last, born))
}

fn arb_size() -> impl Strategy<Value = Size> {
    prop_oneof![Just(Size::Pocket), Just(Size::Standard), Just(Size::Big)]
}

fn arb_book() -> impl Strategy<Value = Book> {
    (arb_person(), "[a-z ]{1,12}", arb_date(), arb_size())
        .prop_map(|(author, title, published, format)| Book::new(author, title, published, format))
}

fn arb_publisher() -> impl Strategy<Value = Publisher> {
    (
        arb_organization(),
        arb_date(),
        prop::collection::vec(arb_book(), 0..8),
        prop::collection::vec(arb_person(), 0..4),
    )
        .prop_map(|(organization, expiry, books, employees)| {
            let mut publisher = Publisher::from_organization(organization, expiry);
            publisher.add_books(books);
            publisher.add_employees(employees);
            publisher
        })
}

fn std_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn equal_keys_hash_equally(org in arb_organization()) {
        let twin = Organization::new_unchecked(org.name(), org.address(), org.registration_year());
        prop_assert_eq!(&org, &twin);
        prop_assert_eq!(org.hash_code(), twin.hash_code());
        prop_assert_eq!(std_hash(&org), std_hash(&twin));
        prop_assert_eq!(org.canonical_string(), twin.canonical_string());
    }

    #[test]
    fn canonical_string_separates_distinct_keys(a in arb_organization(), b in arb_organization()) {
        prop_assert_eq!(a == b, a.canonical_string() == b.canonical_string());
    }

    #[test]
    fn sorts_are_stable_permutations(
        orgs in prop::collection::vec(arb_organization(), 0..24),
        order_index in 0usize..3,
    ) {
        let order = [OrganizationOrder::Name, OrganizationOrder::Year, OrganizationOrder::Address][order_index];
        let expiry = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();

        // Tag each publisher with its insertion position through the expiry date
        let mut collection: PublisherCollection = orgs
            .iter()
            .enumerate()
            .map(|(i, org)| Publisher::from_organization(org.clone(), expiry + chrono::Days::new(i as u64)))
            .collect();
        collection.sort(order);

        prop_assert_eq!(collection.len(), orgs.len());
        prop_assert!(collection.is_sorted_by(order));
        for pair in collection.as_slice().windows(2) {
            if order.compare(pair[0].organization(), pair[1].organization()).is_eq() {
                prop_assert!(pair[0].license_expiry() < pair[1].license_expiry());
            }
        }

        let snapshot = collection.as_slice().to_vec();
        collection.sort(order);
        prop_assert_eq!(collection.as_slice(), snapshot.as_slice());
    }

    #[test]
    fn deep_copy_is_equal_then_independent(publisher in arb_publisher(), title in "[A-Z]{3,8}") {
        let mut original = publisher;
        let copy = original.deep_copy();
        prop_assert_eq!(&original, &copy);

        let mut info = original.organization_info();
        info.set_name(format!("{}-changed", info.name()));
        original.set_organization_info(info).unwrap();
        if let Some(book) = original.books_mut().first_mut() {
            book.title = title;
        }

        prop_assert_ne!(original.name(), copy.name());
        prop_assert_eq!(copy.books().len(), original.books().len());
        if let (Some(a), Some(b)) = (original.books().first(), copy.books().first()) {
            prop_assert_ne!(&a.title, &b.title);
        }
    }

    #[test]
    fn nested_copy_changes_do_not_reach_original(publisher in arb_publisher(), suffix in "[A-Z]{2,5}") {
        let original = publisher;
        let snapshot = original.clone();
        let mut copy = original.deep_copy();

        for book in copy.books_mut() {
            book.author.first_name.push_str(&suffix);
        }
        for employee in copy.employees_mut() {
            employee.last_name.push_str(&suffix);
        }

        prop_assert_eq!(&original, &snapshot);
        if !original.books().is_empty() || !original.employees().is_empty() {
            prop_assert_ne!(&original, &copy);
        }
    }

    #[test]
    fn pocket_percentage_is_bounded(publisher in arb_publisher()) {
        let pct = publisher.pocket_percentage();
        prop_assert!((0.0..=100.0).contains(&pct));
        if publisher.books().is_empty() {
            prop_assert_eq!(pct, 0.0);
        }
    }

    #[test]
    fn outside_and_employee_authors_partition_books(publisher in arb_publisher()) {
        let inside = publisher.books_by_employee_authors().count();
        let outside = publisher.books_by_outside_authors().count();
        prop_assert_eq!(inside + outside, publisher.books().len());
    }
}
