mod test_accept_answer_requires_offer;
mod test_malformed_text_is_rejected;
mod test_reset_abandons_pending_handshake;
