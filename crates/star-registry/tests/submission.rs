//! The ownership protocol end to end: challenge, sign, submit.

mod common;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use proptest::prelude::*;
use star_registry::core::REGISTRY_TAG;
use star_registry::{
    Ledger, LedgerConfig, LedgerError, ManualClock, StarInfo, SubmissionError,
    DEFAULT_FRESHNESS_WINDOW,
};
use star_registry_testkit::{generators, multi_party_wallets, sample_star, TestFixture, Wallet};

fn submission_error(err: LedgerError) -> SubmissionError {
    match err {
        LedgerError::Submission(e) => e,
        other => panic!("expected a submission rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn challenge_embeds_address_and_seconds() -> Result<()> {
    let fixture = TestFixture::new();
    let challenge = fixture
        .ledger
        .request_message_ownership_verification(&fixture.address())?;

    assert_eq!(
        challenge.message,
        format!("{}:1736870400:{}", fixture.address(), REGISTRY_TAG)
    );

    Ok(())
}

#[tokio::test]
async fn challenge_requests_do_not_touch_the_chain() -> Result<()> {
    let fixture = TestFixture::new();
    for _ in 0..3 {
        fixture
            .ledger
            .request_message_ownership_verification(&fixture.address())?;
    }
    assert_eq!(fixture.ledger.height().await, 1);

    Ok(())
}

#[tokio::test]
async fn signed_submission_is_recorded() -> Result<()> {
    common::init_tracing();
    let fixture = TestFixture::new();
    let star = StarInfo::new("68° 52' 56.9", "16h 29m 1.0s", "Found it")
        .with_magnitude("4.2")
        .with_constellation("Dra");

    let (message, signature) = fixture.signed_challenge();
    let block = fixture
        .ledger
        .submit_star(&fixture.address(), &message, &signature, star.clone())
        .await?;

    assert_eq!(block.height(), 1);
    let claim = block.star_claim()?;
    assert_eq!(claim.owner, fixture.address());
    assert_eq!(claim.star, star);
    assert_eq!(fixture.ledger.latest_block().await, Some(block));

    Ok(())
}

#[tokio::test]
async fn message_can_be_reused_within_the_window() -> Result<()> {
    let fixture = TestFixture::new();
    let (message, signature) = fixture.signed_challenge();

    for story in ["one", "two"] {
        fixture
            .ledger
            .submit_star(&fixture.address(), &message, &signature, sample_star(story))
            .await?;
        fixture.clock.advance(Duration::from_secs(60));
    }

    assert_eq!(fixture.ledger.get_stars_by_address(&fixture.address()).await.len(), 2);

    Ok(())
}

#[tokio::test]
async fn malformed_message_is_a_parse_error() {
    let fixture = TestFixture::new();
    let address = fixture.address();

    for message in [
        String::new(),
        address.clone(),
        format!("{}:1736870400", address),
        format!("{}:1736870400:otherRegistry", address),
        format!("{}::{}", address, REGISTRY_TAG),
        format!("{}:17368704OO:{}", address, REGISTRY_TAG),
    ] {
        let err = fixture
            .ledger
            .submit_star(&address, &message, "00", sample_star("x"))
            .await
            .unwrap_err();
        assert!(
            matches!(submission_error(err), SubmissionError::Parse(_)),
            "message {message:?} should fail to parse"
        );
    }
}

#[tokio::test]
async fn address_mismatch_is_checked_before_signature() {
    let fixture = TestFixture::new();
    let other = Wallet::with_seed([0x09; 32]);
    let (message, signature) = fixture.signed_challenge();

    let err = fixture
        .ledger
        .submit_star(&other.address(), &message, &signature, sample_star("x"))
        .await
        .unwrap_err();

    assert_eq!(
        submission_error(err),
        SubmissionError::AddressMismatch {
            address: other.address(),
            message_address: fixture.address(),
        }
    );
}

#[tokio::test]
async fn oversized_timestamp_is_a_timestamp_error() {
    let fixture = TestFixture::new();
    let message = format!("{}:99999999999999999999:{}", fixture.address(), REGISTRY_TAG);
    let signature = fixture.wallet.sign(&message);

    let err = fixture
        .ledger
        .submit_star(&fixture.address(), &message, &signature, sample_star("x"))
        .await
        .unwrap_err();

    assert!(matches!(
        submission_error(err),
        SubmissionError::TimestampParse(_)
    ));
}

#[tokio::test]
async fn signature_from_another_wallet_is_rejected() {
    let fixture = TestFixture::new();
    let impostor = Wallet::with_seed([0x66; 32]);
    let (message, _) = fixture.signed_challenge();
    let forged = impostor.sign(&message);

    let err = fixture
        .ledger
        .submit_star(&fixture.address(), &message, &forged, sample_star("x"))
        .await
        .unwrap_err();

    assert!(!err.is_retryable());
    assert_eq!(
        submission_error(err),
        SubmissionError::SignatureInvalid(fixture.address())
    );
    assert_eq!(fixture.ledger.height().await, 1);
}

#[tokio::test]
async fn garbage_signature_is_rejected() {
    let fixture = TestFixture::new();
    let (message, _) = fixture.signed_challenge();

    for signature in ["", "zz", "deadbeef"] {
        let err = fixture
            .ledger
            .submit_star(&fixture.address(), &message, signature, sample_star("x"))
            .await
            .unwrap_err();
        assert!(matches!(
            submission_error(err),
            SubmissionError::SignatureInvalid(_)
        ));
    }
}

#[tokio::test]
async fn signature_is_checked_before_expiry() {
    let fixture = TestFixture::new();
    let impostor = Wallet::with_seed([0x66; 32]);
    let (message, _) = fixture.signed_challenge();
    fixture.clock.advance(Duration::from_secs(3600));

    let err = fixture
        .ledger
        .submit_star(&fixture.address(), &message, &impostor.sign(&message), sample_star("x"))
        .await
        .unwrap_err();

    assert!(matches!(
        submission_error(err),
        SubmissionError::SignatureInvalid(_)
    ));
}

#[tokio::test]
async fn freshness_window_boundary() -> Result<()> {
    common::init_tracing();
    let fixture = TestFixture::new();
    let (message, signature) = fixture.signed_challenge();

    fixture.clock.advance(DEFAULT_FRESHNESS_WINDOW - Duration::from_millis(1));
    fixture
        .ledger
        .submit_star(&fixture.address(), &message, &signature, sample_star("just in time"))
        .await?;

    fixture.clock.advance(Duration::from_millis(1));
    let err = fixture
        .ledger
        .submit_star(&fixture.address(), &message, &signature, sample_star("too late"))
        .await
        .unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(
        submission_error(err),
        SubmissionError::ExpiredMessage {
            elapsed_ms: 300_000,
            window_ms: 300_000,
        }
    );
    assert_eq!(fixture.ledger.height().await, 2);

    Ok(())
}

#[tokio::test]
async fn custom_freshness_window_is_honored() -> Result<()> {
    let clock = Arc::new(ManualClock::new(1_736_870_400_000));
    let config = LedgerConfig::default()
        .with_clock(clock.clone())
        .with_freshness_window(Duration::from_secs(10));
    let ledger = Ledger::new(star_registry::Ed25519Verifier, config)?;
    let wallet = Wallet::with_seed([0x01; 32]);

    let (message, signature) = star_registry_testkit::signed_challenge(&ledger, &wallet);
    clock.advance(Duration::from_secs(10));

    let err = ledger
        .submit_star(&wallet.address(), &message, &signature, sample_star("x"))
        .await
        .unwrap_err();
    assert!(matches!(
        submission_error(err),
        SubmissionError::ExpiredMessage { window_ms: 10_000, .. }
    ));

    Ok(())
}

#[tokio::test]
async fn future_dated_message_is_accepted() -> Result<()> {
    let fixture = TestFixture::new();
    let (message, signature) = fixture.signed_challenge();

    fixture.clock.set(1_736_870_000_000);
    let block = fixture
        .ledger
        .submit_star(&fixture.address(), &message, &signature, sample_star("early"))
        .await?;
    assert_eq!(block.height(), 1);

    Ok(())
}

#[tokio::test]
async fn address_containing_delimiter_cannot_request_a_challenge() {
    let fixture = TestFixture::new();
    let err = fixture
        .ledger
        .request_message_ownership_verification("bad:address")
        .unwrap_err();

    assert_eq!(err, SubmissionError::InvalidAddress("bad:address".to_string()));
}

#[tokio::test]
async fn empty_address_cannot_request_a_challenge() {
    let fixture = TestFixture::new();
    let err = fixture
        .ledger
        .request_message_ownership_verification("")
        .unwrap_err();

    assert_eq!(err, SubmissionError::InvalidAddress(String::new()));
    assert_eq!(fixture.ledger.height().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submissions_from_many_wallets() -> Result<()> {
    common::init_tracing();
    let fixture = Arc::new(TestFixture::new());
    let wallets = multi_party_wallets(8);

    let mut handles = Vec::new();
    for (i, wallet) in wallets.iter().cloned().enumerate() {
        let fixture = Arc::clone(&fixture);
        handles.push(tokio::spawn(async move {
            let (message, signature) =
                star_registry_testkit::signed_challenge(&fixture.ledger, &wallet);
            fixture
                .ledger
                .submit_star(
                    &wallet.address(),
                    &message,
                    &signature,
                    sample_star(&format!("star {}", i)),
                )
                .await
        }));
    }

    let mut heights = Vec::new();
    for handle in handles {
        heights.push(handle.await??.height());
    }
    heights.sort_unstable();

    assert_eq!(heights, (1..=8).collect::<Vec<u64>>());
    assert!(fixture.ledger.validate_chain().await.is_empty());
    for wallet in &wallets {
        assert_eq!(fixture.ledger.get_stars_by_address(&wallet.address()).await.len(), 1);
    }

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn submitted_stars_read_back_unchanged(seed in any::<[u8; 32]>(), star in generators::star_info()) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        runtime.block_on(async {
            let fixture = TestFixture::with_wallet(Wallet::with_seed(seed));
            let block = fixture.claim_star(star.clone()).await;

            let stored = fixture.ledger.get_block_by_height(block.height()).await.unwrap();
            prop_assert_eq!(stored.star_claim().unwrap().star, star.clone());

            let owned = fixture.ledger.get_stars_by_address(&fixture.address()).await;
            prop_assert_eq!(owned.len(), 1);
            prop_assert_eq!(&owned[0].star, &star);
            Ok(())
        })?;
    }
}
