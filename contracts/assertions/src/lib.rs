//! Assertion helpers shared by the gatekeeper program.
//!
//! Every helper returns `Ok(())` when the condition holds and converts the
//! supplied error into a `ProgramError` otherwise, so call sites read as
//! `check_signer(owner, GatekeeperError::Unauthorized)?`.

#[cfg(target_os = "solana")]
use pinocchio::syscalls::sol_memcmp_;
use pinocchio::{
    account_info::AccountInfo,
    program_error::ProgramError,
    pubkey::{create_program_address, Pubkey},
    ProgramResult,
};
use pinocchio_system::ID as SYSTEM_ID;

#[allow(unused_imports)]
use std::mem::MaybeUninit;

#[inline(always)]
#[cfg(target_os = "solana")]
pub fn sol_assert_bytes_eq(left: &[u8], right: &[u8], len: usize) -> bool {
    if left.len() < len || right.len() < len {
        return false;
    }
    unsafe {
        let mut result = MaybeUninit::<i32>::uninit();
        sol_memcmp_(
            left.as_ptr(),
            right.as_ptr(),
            len as u64,
            result.as_mut_ptr() as *mut i32,
        );
        result.assume_init() == 0
    }
}

#[cfg(not(target_os = "solana"))]
pub fn sol_assert_bytes_eq(left: &[u8], right: &[u8], len: usize) -> bool {
    left.len() >= len && right.len() >= len && left[..len] == right[..len]
}

macro_rules! sol_assert {
  ($func_name:ident, $($param:ident: $type:ty),* $(,)? | $check:expr) => {
      #[inline(always)]
      pub fn $func_name<E: Into<ProgramError>>($($param: $type,)* error: E) -> ProgramResult {
          if $check {
              Ok(())
          } else {
              Err(error.into())
          }
      }
  };
}

macro_rules! sol_assert_return {
  ($func_name:ident, $return_type:ty, $($param:ident: $type:ty),* $(,)? | $check:expr) => {
      #[inline(always)]
      pub fn $func_name<E: Into<ProgramError>>($($param: $type,)* error: E) -> Result<$return_type, ProgramError> {
          match $check {
              Some(value) => Ok(value),
              None => Err(error.into()),
          }
      }
  };
}

// The last seed must be the single bump byte.
sol_assert_return!(check_pda, u8, seeds: &[&[u8]], target_key: &Pubkey, program_id: &Pubkey | {
  match (create_program_address(seeds, program_id), seeds.last()) {
    (Ok(pda), Some(bump)) if bump.len() == 1
      && sol_assert_bytes_eq(pda.as_ref(), target_key.as_ref(), 32) => Some(bump[0]),
    _ => None,
  }
});

sol_assert!(check_signer, account: &AccountInfo |
  account.is_signer()
);

sol_assert!(check_writable_signer, account: &AccountInfo |
  account.is_writable() && account.is_signer()
);

sol_assert!(check_key_match, account: &AccountInfo, target_key: &Pubkey |
  sol_assert_bytes_eq(account.key().as_ref(), target_key.as_ref(), 32)
);

sol_assert!(check_owner, account: &AccountInfo, owner: &Pubkey |
  account.is_owned_by(owner)
);

sol_assert!(check_system_owner, account: &AccountInfo |
  account.is_owned_by(&SYSTEM_ID)
);

sol_assert!(check_zero_data, account: &AccountInfo |
  account.data_len() == 0
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_eq_compares_prefix_of_requested_length() {
        assert!(sol_assert_bytes_eq(&[1, 2, 3], &[1, 2, 4], 2));
        assert!(!sol_assert_bytes_eq(&[1, 2, 3], &[1, 2, 4], 3));
        assert!(!sol_assert_bytes_eq(&[1], &[1, 2], 2));
    }
}
